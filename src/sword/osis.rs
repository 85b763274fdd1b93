//! OSIS XML output.
//!
//! Produces a minimal, well-formed OSIS document:
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <osis xmlns="http://www.bibletechnologies.net/2003/OSIS/namespace">
//!   <osisText osisIDWork="Bible">
//!     <verse osisID="Gen.1.1">...</verse>
//!   </osisText>
//! </osis>
//! ```

use std::io::Write;

use quick_xml::escape::{escape, partial_escape};

use super::types::error::Result;
use super::types::models::DecodedRecord;

pub const OSIS_NAMESPACE: &str = "http://www.bibletechnologies.net/2003/OSIS/namespace";

const HEADER: &str = concat!(
    "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
    "<osis xmlns=\"http://www.bibletechnologies.net/2003/OSIS/namespace\">\n",
    "  <osisText osisIDWork=\"Bible\">\n",
);

const FOOTER: &str = "  </osisText>\n</osis>\n";

/// Streams decoded records into an OSIS document.
///
/// The header is written on construction and the footer by [`finish`](Self::finish);
/// dropping the writer without finishing leaves the document unterminated.
pub struct OsisWriter<W: Write> {
    sink: W,
    max_records: Option<usize>,
    written: usize,
}

impl<W: Write> OsisWriter<W> {
    /// Writes the declaration and opening elements.
    pub fn new(mut sink: W) -> Result<Self> {
        sink.write_all(HEADER.as_bytes())?;
        Ok(Self {
            sink,
            max_records: None,
            written: 0,
        })
    }

    /// Stop writing records once `max` have been emitted.
    pub fn with_max_records(mut self, max: Option<usize>) -> Self {
        self.max_records = max;
        self
    }

    /// Appends one `<verse>` element. Returns `false` if the cap was reached
    /// and the record was not written.
    pub fn write_record(&mut self, record: &DecodedRecord) -> Result<bool> {
        if self.max_records.is_some_and(|max| self.written >= max) {
            return Ok(false);
        }
        let osis_id = record.reference.to_string();
        writeln!(
            self.sink,
            "    <verse osisID=\"{}\">{}</verse>",
            escape(osis_id.as_str()),
            partial_escape(record.text.as_str())
        )?;
        self.written += 1;
        Ok(true)
    }

    /// Writes every record from `records`, honouring the cap.
    pub fn write_records<'r>(
        &mut self,
        records: impl IntoIterator<Item = &'r DecodedRecord>,
    ) -> Result<usize> {
        let before = self.written;
        for record in records {
            if !self.write_record(record)? {
                break;
            }
        }
        Ok(self.written - before)
    }

    /// Number of records written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Closes the document, flushes, and hands back the sink.
    pub fn finish(mut self) -> Result<W> {
        self.sink.write_all(FOOTER.as_bytes())?;
        self.sink.flush()?;
        Ok(self.sink)
    }
}

/// Renders `records` to a complete OSIS document in memory.
pub fn to_string<'r>(records: impl IntoIterator<Item = &'r DecodedRecord>) -> Result<String> {
    let mut writer = OsisWriter::new(Vec::new())?;
    writer.write_records(records)?;
    let bytes = writer.finish()?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
