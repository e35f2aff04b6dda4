//! The output session: one [`EclipseIO`] per simulation run.

use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use eclio_core::{Solution, Wells};
use eclio_fortio::{scan_records, KeywordWriter};
use eclio_grid::RegionCache;
use tracing::{debug, info, instrument, warn};

use crate::config::OutputConfig;
use crate::egrid::write_egrid;
use crate::error::OutputError;
use crate::init::{validate_extras, write_init};
use crate::restart::{validate_step, write_step, StepData};
use crate::state::EclipseState;

/// Progress of a session.
///
/// States only move forward. Re-running an earlier operation rewrites its
/// file but does not move the session back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WriterState {
    /// Nothing written yet.
    Uninitialized,
    /// EGRID written.
    GridWritten,
    /// INIT written.
    Initialized,
    /// At least one restart record written.
    Stepping,
}

impl fmt::Display for WriterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Uninitialized => "uninitialized",
            Self::GridWritten => "grid-written",
            Self::Initialized => "initialized",
            Self::Stepping => "stepping",
        };
        f.write_str(s)
    }
}

/// Writes the EGRID, INIT and unified restart files of one run.
///
/// Restart output is overwrite-safe: writing step `n` first drops every
/// record already in the file with a sequence number `>= n`, so the file
/// always holds the steps written since the last restart point, in order.
/// Re-running a case from step `n` therefore produces the same bytes as
/// the original run.
///
/// Every method validates its arguments before opening any file. A call
/// failing with [`OutputError::InvalidArgument`] changes nothing on disk.
pub struct EclipseIO {
    state: EclipseState,
    config: OutputConfig,
    regions: RegionCache,
    writer_state: WriterState,
    last_written_step: Option<u32>,
    last_summary: BTreeMap<String, f64>,
}

impl EclipseIO {
    /// Create a session, creating the output directory if needed.
    ///
    /// Fails if the configuration is invalid or the schedule places a
    /// completion outside the grid.
    pub fn new(state: EclipseState, config: OutputConfig) -> Result<Self, OutputError> {
        config.validate()?;
        let regions = RegionCache::new(&state.properties, &state.grid, &state.schedule)?;
        fs::create_dir_all(&config.output_dir)?;
        info!(
            dir = %config.output_dir.display(),
            base_name = %config.base_name,
            active_cells = state.grid.num_active(),
            "output session created"
        );
        Ok(Self {
            state,
            config,
            regions,
            writer_state: WriterState::Uninitialized,
            last_written_step: None,
            last_summary: BTreeMap::new(),
        })
    }

    /// Create a session configured from the state's own output settings.
    pub fn from_state(state: EclipseState) -> Result<Self, OutputError> {
        let config = OutputConfig::from_io_config(&state.io_config);
        Self::new(state, config)
    }

    /// Write `<NAME>.EGRID`, replacing any existing file.
    #[instrument(skip_all, name = "initialize")]
    pub fn initialize(&mut self) -> Result<(), OutputError> {
        if self.config.write_egrid {
            let path = self.config.file_path("EGRID");
            let state = &self.state;
            write_atomically(&path, |w| write_egrid(w, state))?;
            info!(path = %path.display(), "EGRID written");
        }
        self.advance(WriterState::GridWritten);
        Ok(())
    }

    /// Write `<NAME>.INIT` with the static properties plus caller extras.
    ///
    /// `extra_fields` contributes its [`Init`](eclio_core::TargetType::Init)
    /// fields, converted from SI; `extra_int_fields` is written as-is, in
    /// name order. Every extra needs a keyword name of at most 8
    /// characters and one value per active cell. The file is replaced
    /// atomically, so a failure leaves any previous INIT in place.
    ///
    /// Writes the EGRID first if this session has not done so.
    #[instrument(skip_all, name = "write_initial")]
    pub fn write_initial(
        &mut self,
        extra_fields: &Solution,
        extra_int_fields: &BTreeMap<String, Vec<i32>>,
    ) -> Result<(), OutputError> {
        validate_extras(&self.state, extra_fields, extra_int_fields)?;
        if self.writer_state < WriterState::GridWritten {
            self.initialize()?;
        }
        if self.config.write_init {
            let path = self.config.file_path("INIT");
            let state = &self.state;
            write_atomically(&path, |w| {
                write_init(w, state, extra_fields, extra_int_fields)
            })?;
            info!(path = %path.display(), "INIT written");
        }
        self.advance(WriterState::Initialized);
        Ok(())
    }

    /// Append the restart record for report step `step` to `<NAME>.UNRST`.
    ///
    /// Records with a sequence number `>= step` are removed first, as is
    /// any undecodable tail. Sub-steps are not written to the restart
    /// file. `summary_values` is kept as [`last_summary`](Self::last_summary)
    /// and not written.
    #[allow(clippy::too_many_arguments)]
    #[instrument(skip(self, solution, wells, group_values, aquifer_values, summary_values))]
    pub fn write_time_step(
        &mut self,
        step: u32,
        is_substep: bool,
        elapsed_seconds: f64,
        solution: &Solution,
        wells: &Wells,
        group_values: &BTreeMap<String, f64>,
        aquifer_values: &BTreeMap<String, f64>,
        summary_values: &BTreeMap<String, f64>,
    ) -> Result<(), OutputError> {
        if is_substep {
            debug!("sub-step not written to the restart file");
            self.last_summary = summary_values.clone();
            return Ok(());
        }

        let seqnum = i32::try_from(step).map_err(|_| OutputError::InvalidArgument {
            reason: format!("report step {step} does not fit SEQNUM"),
        })?;
        let data = StepData {
            step: seqnum,
            elapsed_seconds,
            solution,
            wells,
            group_values,
            aquifer_values,
        };
        validate_step(&self.state, &data)?;

        if self.writer_state < WriterState::GridWritten {
            self.initialize()?;
        }
        if self.config.write_restart {
            let mut w = KeywordWriter::new(Vec::new());
            write_step(&mut w, &self.state, &data)?;
            self.append_record(seqnum, &w.into_inner())?;
        }

        self.last_written_step = Some(step);
        self.last_summary = summary_values.clone();
        self.advance(WriterState::Stepping);
        Ok(())
    }

    /// Sequence numbers of the complete records in `<NAME>.UNRST`, in file
    /// order. Empty when the file does not exist.
    pub fn restart_steps(&self) -> Result<Vec<i32>, OutputError> {
        let path = self.config.file_path("UNRST");
        let file = match File::open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let scan = scan_records(BufReader::new(file))?;
        let limit = scan.trusted_len();
        Ok(scan
            .records
            .iter()
            .filter(|r| r.offset < limit)
            .map(|r| r.seqnum)
            .collect())
    }

    /// Step of the last restart record written by this session.
    pub fn last_written_step(&self) -> Option<u32> {
        self.last_written_step
    }

    /// Summary values passed with the latest time step, sub-steps included.
    pub fn last_summary(&self) -> &BTreeMap<String, f64> {
        &self.last_summary
    }

    /// Current session state.
    pub fn writer_state(&self) -> WriterState {
        self.writer_state
    }

    /// The input models.
    pub fn eclipse_state(&self) -> &EclipseState {
        &self.state
    }

    /// The output configuration.
    pub fn config(&self) -> &OutputConfig {
        &self.config
    }

    /// Region index built from FIPNUM and the schedule.
    pub fn region_cache(&self) -> &RegionCache {
        &self.regions
    }

    /// Path of the output file with extension `ext`.
    pub fn file_path(&self, ext: &str) -> PathBuf {
        self.config.file_path(ext)
    }

    fn advance(&mut self, to: WriterState) {
        if to > self.writer_state {
            info!(from = %self.writer_state, to = %to, "writer state changed");
            self.writer_state = to;
        }
    }

    fn append_record(&self, step: i32, record: &[u8]) -> Result<(), OutputError> {
        let path = self.config.file_path("UNRST");
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)?;
        let len = file.metadata()?.len();

        let scan = scan_records(BufReader::new(&file))?;
        if let Some(err) = &scan.corrupt_tail {
            warn!(
                path = %path.display(),
                offset = scan.valid_len,
                error = %err,
                "discarding undecodable restart tail"
            );
        }
        let at = scan.truncation_point(step);
        if at < len {
            debug!(step, offset = at, dropped = len - at, "restart file truncated");
        }

        file.set_len(at)?;
        file.seek(SeekFrom::Start(at))?;
        file.write_all(record)?;
        file.sync_data()?;
        debug!(step, bytes = record.len(), "restart record appended");
        Ok(())
    }
}

impl fmt::Debug for EclipseIO {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EclipseIO")
            .field("config", &self.config)
            .field("writer_state", &self.writer_state)
            .field("last_written_step", &self.last_written_step)
            .finish_non_exhaustive()
    }
}

/// Write a keyword file to a temporary sibling, then rename it over `path`.
fn write_atomically<F>(path: &Path, body: F) -> Result<(), OutputError>
where
    F: FnOnce(&mut KeywordWriter<BufWriter<File>>) -> Result<(), OutputError>,
{
    let tmp = temp_path(path);
    match write_file(&tmp, body) {
        Ok(()) => {
            fs::rename(&tmp, path)?;
            Ok(())
        }
        Err(e) => {
            if let Err(cleanup) = fs::remove_file(&tmp) {
                debug!(path = %tmp.display(), error = %cleanup, "temporary file not removed");
            }
            Err(e)
        }
    }
}

fn write_file<F>(path: &Path, body: F) -> Result<(), OutputError>
where
    F: FnOnce(&mut KeywordWriter<BufWriter<File>>) -> Result<(), OutputError>,
{
    let mut w = KeywordWriter::new(BufWriter::new(File::create(path)?));
    body(&mut w)?;
    w.flush()?;
    let file = w.into_inner().into_inner().map_err(|e| e.into_error())?;
    file.sync_all()?;
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsStr::to_os_string)
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
