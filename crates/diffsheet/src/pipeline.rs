//! Batch orchestration: HTML reports in, one workbook out
//!
//! The workbook always holds, in order, the compare sheet, the summary
//! sheet and one sheet per file report that converted cleanly.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use diffsheet_core::{Workbook, Worksheet, MAX_SHEET_NAME_LEN};
use diffsheet_html::{Conversion, HtmlReader, HtmlResult};
use walkdir::WalkDir;

use crate::compose::{Composer, FileReport};
use crate::config::ReportConfig;
use crate::error::{ReportResult, ReportWarning};
use crate::policy;

/// Characters kept before the file index when a name is too long
const LONG_NAME_PREFIX_LEN: usize = 28;

/// The HTML files making up one report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSource {
    /// The summary report, `<name>.html`
    pub summary: PathBuf,
    /// Per-file reports, sorted by path
    pub files: Vec<PathBuf>,
}

impl ReportSource {
    /// Find the per-file reports of `summary` under its `<name>.files/`
    /// directory
    ///
    /// A missing directory yields a report without files.
    pub fn discover<P: AsRef<Path>>(summary: P) -> ReportResult<Self> {
        let summary = summary.as_ref().to_path_buf();
        let stem = summary
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let dir = summary.with_file_name(format!("{}.files", stem));

        let mut files = Vec::new();
        if dir.is_dir() {
            for entry in WalkDir::new(&dir).follow_links(false) {
                let entry = entry.map_err(std::io::Error::from)?;
                if !entry.file_type().is_file() {
                    continue;
                }
                let is_html = entry
                    .path()
                    .extension()
                    .and_then(|e| e.to_str())
                    .map_or(false, |e| e.eq_ignore_ascii_case("html"));
                if is_html {
                    files.push(entry.into_path());
                }
            }
        } else {
            log::warn!("no report directory at {}", dir.display());
        }
        files.sort();

        log::info!("found {} file report(s) for {}", files.len(), summary.display());
        Ok(Self { summary, files })
    }
}

/// A finished report
#[derive(Debug)]
pub struct Report {
    pub workbook: Workbook,
    /// One record per file report, in input order
    pub files: Vec<FileReport>,
    /// Problems found in the summary report
    pub summary_warnings: Vec<ReportWarning>,
    /// Summary rows that received a link to their file sheet
    pub summary_links: usize,
}

impl Report {
    /// Number of files left out of the workbook
    pub fn failed_count(&self) -> usize {
        self.files.iter().filter(|f| !f.is_ok()).count()
    }
}

/// Recover the file name from a report stem that encodes its path
///
/// Report files are named after their path with separators turned into
/// `_`. The part holding the extension ends the name; scanning back from
/// it, the name starts right after the nearest folder keyword. At least
/// the part before the extension is kept, and a stem without any `.`
/// yields its last part.
///
/// ```
/// use diffsheet::pipeline::extract_filename_from_stem;
/// use diffsheet::ReportConfig;
///
/// let config = ReportConfig::default();
/// assert_eq!(
///     extract_filename_from_stem("modcommon_modules_SPM_SEQ_spm_tbl_rinse.t", &config),
///     "spm_tbl_rinse.t"
/// );
/// assert_eq!(extract_filename_from_stem("sc2stb_etc_cset_file.SP3", &config), "cset_file.SP3");
/// ```
pub fn extract_filename_from_stem(stem: &str, config: &ReportConfig) -> String {
    let parts: Vec<&str> = stem.split('_').collect();

    let Some(ext_index) = parts.iter().rposition(|part| part.contains('.')) else {
        return parts.last().copied().unwrap_or_default().to_string();
    };

    let mut start = (0..=ext_index)
        .rev()
        .find(|&i| config.is_folder_keyword(parts[i]))
        .map_or(0, |i| i + 1);
    if ext_index < start + 1 {
        start = ext_index.saturating_sub(1);
    }

    parts[start..=ext_index].join("_")
}

/// Preferred title of the `index`-th (1-based) file sheet
///
/// Names over the title limit keep 28 characters and get `_<index>`.
pub fn preferred_sheet_name(filename: &str, index: usize) -> String {
    if filename.chars().count() <= MAX_SHEET_NAME_LEN {
        return filename.to_string();
    }
    let prefix: String = filename.chars().take(LONG_NAME_PREFIX_LEN).collect();
    format!("{}_{}", prefix, index)
}

/// Per-file state between conversion and composition
enum Slot {
    /// In the workbook; holds the conversion warnings
    Admitted(Vec<ReportWarning>),
    Failed(FileReport),
}

/// Builds reports with one configuration
pub struct ReportBuilder<'c> {
    config: &'c ReportConfig,
}

impl<'c> ReportBuilder<'c> {
    pub fn new(config: &'c ReportConfig) -> Self {
        Self { config }
    }

    /// Convert and assemble all files of `source`
    ///
    /// Only an unreadable summary stops the build; a file that fails is
    /// recorded on its [`FileReport`] and left out.
    pub fn build(&self, source: &ReportSource) -> ReportResult<Report> {
        let options = &self.config.html;
        let summary =
            HtmlReader::read_file(&source.summary, &self.config.summary_sheet_name, options)?;

        let stems: Vec<String> = source
            .files
            .iter()
            .map(|path| {
                path.file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default()
            })
            .collect();

        self.assemble(summary, &stems, |index, title| {
            HtmlReader::read_file(&source.files[index], title, options)
        })
    }

    /// Assemble a report from HTML held in memory: `(stem, html)` per file
    pub fn build_from_str(&self, summary_html: &str, files: &[(&str, &str)]) -> ReportResult<Report> {
        let options = &self.config.html;
        let summary = HtmlReader::read_str(summary_html, &self.config.summary_sheet_name, options)?;
        let stems: Vec<String> = files.iter().map(|(stem, _)| stem.to_string()).collect();

        self.assemble(summary, &stems, |index, title| {
            HtmlReader::read_str(files[index].1, title, options)
        })
    }

    fn assemble<F>(&self, summary: Conversion, stems: &[String], mut convert: F) -> ReportResult<Report>
    where
        F: FnMut(usize, &str) -> HtmlResult<Conversion>,
    {
        self.config.validate()?;
        let config = self.config;

        let mut workbook = Workbook::new();
        workbook.add_worksheet_with_name(&config.compare_sheet_name)?;

        workbook.add_existing_worksheet(summary.sheet)?;
        let summary_warnings: Vec<ReportWarning> =
            summary.warnings.into_iter().map(ReportWarning::from).collect();

        // Sheet title -> file name, and encoded stem -> sheet title
        let mut labels: BTreeMap<String, String> = BTreeMap::new();
        let mut stem_titles: BTreeMap<String, String> = BTreeMap::new();
        let mut slots = Vec::with_capacity(stems.len());

        for (index, stem) in stems.iter().enumerate() {
            let filename = extract_filename_from_stem(stem, config);
            let title = workbook.unique_sheet_name(&preferred_sheet_name(&filename, index + 1));
            log::debug!("report '{}' -> file '{}' -> sheet '{}'", stem, filename, title);

            match self.admit(&mut workbook, convert(index, &title)) {
                Ok(warnings) => {
                    labels.insert(title.clone(), filename);
                    stem_titles.insert(stem.clone(), title);
                    slots.push(Slot::Admitted(warnings));
                }
                Err(e) => {
                    log::error!("skipping '{}': {}", stem, e);
                    slots.push(Slot::Failed(FileReport::failed(filename, e)));
                }
            }

            if (index + 1) % 10 == 0 {
                log::info!("processed {}/{} files...", index + 1, stems.len());
            }
        }

        let mut compare = Worksheet::new(config.compare_sheet_name.as_str());
        let composed = Composer::new(config, &labels)
            .compose(&mut compare, workbook.worksheets().skip(2))?;
        *workbook.require_worksheet_mut(&config.compare_sheet_name)? = compare;

        for (index, sheet) in workbook.worksheets_mut().enumerate() {
            if index != 1 {
                policy::apply(sheet, config)?;
            }
        }

        let summary_links = link_summary(&mut workbook, &stem_titles, &labels, config)?;

        let mut composed = composed.into_iter();
        let files = slots
            .into_iter()
            .filter_map(|slot| match slot {
                Slot::Failed(report) => Some(report),
                Slot::Admitted(mut warnings) => composed.next().map(|mut report| {
                    warnings.append(&mut report.warnings);
                    report.warnings = warnings;
                    report
                }),
            })
            .collect();

        Ok(Report {
            workbook,
            files,
            summary_warnings,
            summary_links,
        })
    }

    /// Add a converted file sheet to the workbook, returning its warnings
    fn admit(
        &self,
        workbook: &mut Workbook,
        conversion: HtmlResult<Conversion>,
    ) -> ReportResult<Vec<ReportWarning>> {
        let Conversion { mut sheet, warnings } = conversion?;
        policy::prepare_source_sheet(&mut sheet, self.config)?;
        workbook.add_existing_worksheet(sheet)?;
        Ok(warnings.into_iter().map(ReportWarning::from).collect())
    }
}

/// Link each summary row's name cell to the sheet built from that file
///
/// Rows are read from `summary_start_row` until the first empty name cell.
/// The sheet is found by the encoded stem `<folder>_<name>` (folder
/// separators as `_`), then by file name.
fn link_summary(
    workbook: &mut Workbook,
    stem_titles: &BTreeMap<String, String>,
    labels: &BTreeMap<String, String>,
    config: &ReportConfig,
) -> ReportResult<usize> {
    let summary = workbook.require_worksheet_mut(&config.summary_sheet_name)?;
    let Some(max_row) = summary.max_row() else {
        return Ok(0);
    };

    let mut linked = 0;
    for row in config.summary_start_row..=max_row {
        let Some(name) = summary.value_at(row, config.summary_name_column) else {
            break;
        };
        let name = name.to_string();

        let by_stem = summary
            .value_at(row, config.summary_folder_column)
            .map(|folder| format!("{}_{}", folder.replace('\\', "_"), name))
            .and_then(|stem| stem_titles.get(&stem));
        let by_name = || {
            labels
                .iter()
                .find(|(_, file)| **file == name)
                .map(|(title, _)| title)
        };

        match by_stem.or_else(by_name) {
            Some(title) => {
                let target = format!("'{}'!A1", title.replace('\'', "''"));
                summary.set_hyperlink_at(row, config.summary_name_column, target)?;
                linked += 1;
            }
            None => log::warn!("summary row {}: no sheet for '{}'", row + 1, name),
        }
    }
    Ok(linked)
}
