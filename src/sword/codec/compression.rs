//! Decompression for module payload blocks.
//!
//! Compressed modules store every slot as an independent zlib stream
//! (`CompressType=ZIP` in the module descriptor).

use flate2::{Decompress, FlushDecompress, Status};
use log::{debug, trace};

use crate::sword::types::error::RecordError;

/// Output growth step when the indexed size turns out to be too small.
const GROW_STEP: usize = 4096;

/// Upper bound on the up-front allocation taken from an index entry.
const MAX_PREALLOC: usize = 1 << 20;

/// Inflates a zlib payload into `output`.
///
/// The stream must run to its end marker; a stream that stops early is
/// reported as corrupt rather than returned partially. `expected_size`
/// comes from the index and is only used as a capacity hint; a mismatch
/// against the actual inflated size is logged, not rejected.
///
/// # Errors
/// Returns [`RecordError::Decompression`] if the stream is corrupt or truncated.
pub fn decompress_payload_into(
    output: &mut Vec<u8>,
    payload: &[u8],
    expected_size: u64,
) -> Result<(), RecordError> {
    output.clear();
    output.reserve((expected_size as usize).clamp(1, MAX_PREALLOC));

    trace!(
        "Decompressing with Zlib: {} bytes -> {} bytes (expected)",
        payload.len(),
        expected_size
    );

    let mut inflater = Decompress::new(true);
    loop {
        let (in_before, out_before) = (inflater.total_in(), inflater.total_out());
        let consumed = in_before as usize;
        let status = inflater
            .decompress_vec(&payload[consumed..], output, FlushDecompress::Finish)
            .map_err(|e| RecordError::Decompression(format!("Zlib decompression failed: {}", e)))?;

        match status {
            Status::StreamEnd => break,
            Status::Ok | Status::BufError if output.len() == output.capacity() => {
                output.reserve(GROW_STEP);
            }
            Status::Ok | Status::BufError => {
                let stalled =
                    inflater.total_in() == in_before && inflater.total_out() == out_before;
                if stalled || inflater.total_in() as usize == payload.len() {
                    return Err(RecordError::Decompression(format!(
                        "Zlib stream ended early after {} of {} input bytes",
                        inflater.total_in(),
                        payload.len()
                    )));
                }
            }
        }
    }

    if output.len() as u64 != expected_size {
        debug!(
            "Inflated size {} differs from indexed size {}",
            output.len(),
            expected_size
        );
    }

    Ok(())
}

/// Allocating variant of [`decompress_payload_into`].
pub fn decompress_payload(payload: &[u8], expected_size: u64) -> Result<Vec<u8>, RecordError> {
    let mut output = Vec::new();
    decompress_payload_into(&mut output, payload, expected_size)?;
    Ok(output)
}
