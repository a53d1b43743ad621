//! XLSX writer
//!
//! The package is assembled part by part: content types, relationships,
//! the workbook, the shared style sheet and one part per worksheet.

mod parts;
mod sheet;

use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use diffsheet_core::Workbook;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::error::{XlsxError, XlsxResult};
use crate::styles::XlsxStyleTable;

use self::sheet::SheetPart;

/// XLSX file writer
pub struct XlsxWriter;

impl XlsxWriter {
    /// Write a workbook to a file path
    ///
    /// This is a single attempt; a file locked by another program surfaces
    /// as [`XlsxError::Io`].
    pub fn write_file<P: AsRef<Path>>(workbook: &Workbook, path: P) -> XlsxResult<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        Self::write(workbook, BufWriter::new(file))?;
        log::info!("wrote {} sheet(s) to {}", workbook.sheet_count(), path.display());
        Ok(())
    }

    /// Write a workbook to a writer
    pub fn write<W: Write + Seek>(workbook: &Workbook, writer: W) -> XlsxResult<()> {
        if workbook.is_empty() {
            return Err(XlsxError::InvalidFormat(
                "a workbook needs at least one worksheet".into(),
            ));
        }

        let styles = XlsxStyleTable::build(workbook);
        let sheet_count = workbook.sheet_count();
        let mut package = Package::new(writer);

        package.add("[Content_Types].xml", &parts::content_types(sheet_count))?;
        package.add("_rels/.rels", &parts::root_relationships())?;
        package.add("xl/workbook.xml", &parts::workbook(workbook))?;
        package.add(
            "xl/_rels/workbook.xml.rels",
            &parts::workbook_relationships(sheet_count),
        )?;
        package.add("xl/styles.xml", &styles.to_styles_xml())?;

        for (index, worksheet) in workbook.worksheets().enumerate() {
            let number = index + 1;
            let part = SheetPart::render(worksheet, &styles);
            package.add(&format!("xl/worksheets/sheet{}.xml", number), &part.xml)?;
            if !part.external_links.is_empty() {
                package.add(
                    &format!("xl/worksheets/_rels/sheet{}.xml.rels", number),
                    &parts::hyperlink_relationships(&part.external_links),
                )?;
            }
            log::debug!(
                "wrote sheet '{}' ({} cells, {} merges)",
                worksheet.name(),
                worksheet.cell_count(),
                worksheet.merged_regions().len()
            );
        }

        package.finish()
    }
}

/// ZIP container receiving the package parts
struct Package<W: Write + Seek> {
    zip: ZipWriter<W>,
}

impl<W: Write + Seek> Package<W> {
    fn new(writer: W) -> Self {
        Self {
            zip: ZipWriter::new(writer),
        }
    }

    fn add(&mut self, name: &str, xml: &str) -> XlsxResult<()> {
        self.zip
            .start_file(name.to_string(), SimpleFileOptions::default())?;
        self.zip.write_all(xml.as_bytes())?;
        Ok(())
    }

    fn finish(self) -> XlsxResult<()> {
        let mut writer = self.zip.finish()?;
        writer.flush()?;
        Ok(())
    }
}
