//! Stream reassembler
//!
//! Serial transports deliver bytes in arbitrary chunks: a frame may be
//! split across several reads, or several frames may arrive in one. The
//! [`Reassembler`] accumulates chunks and cuts complete frames out of them
//! by scanning for the header signature and honouring the length field.
//!
//! Bytes that cannot belong to a frame are dropped silently; the header
//! scan resynchronizes on the next signature. Validation of the extracted
//! frame (checksum, address) is left to [`parse`](crate::parse).
//!
//! # Example
//!
//! ```
//! use envsensor_core::{request, Reassembler};
//!
//! let frame = request::read_flash_status();
//! let mut reassembler = Reassembler::new();
//!
//! // First half: nothing complete yet
//! assert_eq!(reassembler.feed(&frame[..5]).count(), 0);
//!
//! // Second half completes the frame
//! let frames: Vec<_> = reassembler.feed(&frame[5..]).collect();
//! assert_eq!(frames, vec![frame.freeze()]);
//! ```

use byteorder::{ByteOrder, LittleEndian};
use bytes::{Buf, Bytes, BytesMut};
use tracing::{debug, trace};

use crate::constants::{offsets, DEFAULT_MAX_FRAME_SIZE, HEADER, MIN_FRAME_SIZE, PREFIX_SIZE};

/// Accumulates transport bytes and yields complete frames
///
/// One instance per open session; the buffer is never shared.
#[derive(Debug)]
pub struct Reassembler {
    /// Bytes received but not yet yielded
    buffer: BytesMut,
    /// Largest frame worth waiting for
    max_frame_size: usize,
}

impl Reassembler {
    /// Create an empty reassembler with the default frame size limit
    pub fn new() -> Self {
        Self::with_max_frame_size(DEFAULT_MAX_FRAME_SIZE)
    }

    /// Create an empty reassembler with a custom frame size limit
    ///
    /// A header declaring a frame larger than `max_frame_size` is treated
    /// as garbage, which bounds the buffer when a sender never completes a
    /// frame. The limit never drops below the smallest valid frame.
    pub fn with_max_frame_size(max_frame_size: usize) -> Self {
        Self {
            buffer: BytesMut::with_capacity(max_frame_size.min(DEFAULT_MAX_FRAME_SIZE)),
            max_frame_size: max_frame_size.max(MIN_FRAME_SIZE),
        }
    }

    /// Append a chunk and iterate over the frames it completes
    ///
    /// The iterator is lazy. Frames it does not get to yield (because it
    /// was dropped early) stay buffered and come out of the next call.
    pub fn feed(&mut self, chunk: &[u8]) -> Frames<'_> {
        self.buffer.extend_from_slice(chunk);

        trace!(
            chunk_len = chunk.len(),
            buffered = self.buffer.len(),
            "Fed chunk"
        );

        Frames { reassembler: self }
    }

    /// Extract the next complete frame from what is already buffered
    pub fn next_frame(&mut self) -> Option<Bytes> {
        while self.buffer.len() >= PREFIX_SIZE {
            let Some(start) = find_header(&self.buffer) else {
                self.discard_garbage();
                return None;
            };

            if start > 0 {
                trace!(skipped = start, "Dropping bytes before header");
                self.buffer.advance(start);
                continue;
            }

            let declared = LittleEndian::read_u16(&self.buffer[offsets::LENGTH..]) as usize;
            let frame_size = declared + PREFIX_SIZE;

            if frame_size > self.max_frame_size {
                debug!(
                    frame_size,
                    max = self.max_frame_size,
                    "Declared frame exceeds limit, skipping header"
                );
                self.buffer.advance(1);
                continue;
            }

            if self.buffer.len() < frame_size {
                trace!(
                    have = self.buffer.len(),
                    need = frame_size,
                    "Waiting for rest of frame"
                );
                return None;
            }

            let frame = self.buffer.split_to(frame_size).freeze();

            trace!(frame = %hex::encode(&frame), "Extracted frame");

            return Some(frame);
        }

        None
    }

    /// Number of bytes waiting for more input
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if nothing is buffered
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Get the frame size limit
    pub fn max_frame_size(&self) -> usize {
        self.max_frame_size
    }

    /// Drop everything buffered
    pub fn reset(&mut self) {
        if !self.buffer.is_empty() {
            debug!(dropped = self.buffer.len(), "Resetting reassembler");
        }
        self.buffer.clear();
    }

    /// No header anywhere: keep only a trailing first header byte
    fn discard_garbage(&mut self) {
        let len = self.buffer.len();

        if self.buffer.last() == Some(&HEADER[0]) {
            trace!(dropped = len - 1, "No header found, keeping trailing byte");
            self.buffer.advance(len - 1);
        } else {
            trace!(dropped = len, "No header found, dropping buffer");
            self.buffer.clear();
        }
    }
}

impl Default for Reassembler {
    fn default() -> Self {
        Self::new()
    }
}

/// Complete frames produced by one [`Reassembler::feed`] call
#[derive(Debug)]
pub struct Frames<'a> {
    reassembler: &'a mut Reassembler,
}

impl Iterator for Frames<'_> {
    type Item = Bytes;

    fn next(&mut self) -> Option<Bytes> {
        self.reassembler.next_frame()
    }
}

fn find_header(buf: &[u8]) -> Option<usize> {
    buf.windows(HEADER.len()).position(|w| w == &HEADER[..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse, request, Address, Command, DecodedResponse, Frame};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn status_frame(address: Address, value: u8) -> Bytes {
        Frame::with_data(Command::Read, address, vec![value]).encode().freeze()
    }

    fn latest_data_frame(sequence: u8) -> Bytes {
        let mut data = vec![0u8; 21];
        data[0] = sequence;
        data[1..3].copy_from_slice(&2250i16.to_le_bytes());
        Frame::with_data(Command::Read, Address::LatestDataShort, data).encode().freeze()
    }

    #[test]
    fn test_single_frame_one_chunk() {
        let frame = latest_data_frame(1);
        let mut reassembler = Reassembler::new();

        let frames: Vec<_> = reassembler.feed(&frame).collect();

        assert_eq!(frames, vec![frame]);
        assert!(reassembler.is_empty());
    }

    #[test]
    fn test_partial_frame_is_retained() {
        let frame = latest_data_frame(1);
        let mut reassembler = Reassembler::new();

        assert_eq!(reassembler.feed(&frame[..10]).count(), 0);
        assert_eq!(reassembler.buffered_len(), 10);

        let frames: Vec<_> = reassembler.feed(&frame[10..]).collect();
        assert_eq!(frames, vec![frame]);
    }

    #[test]
    fn test_coalesced_frames() {
        let first = latest_data_frame(1);
        let second = status_frame(Address::Led, 0);
        let third = latest_data_frame(2);

        let mut chunk = Vec::new();
        chunk.extend_from_slice(&first);
        chunk.extend_from_slice(&second);
        chunk.extend_from_slice(&third[..4]);

        let mut reassembler = Reassembler::new();
        let frames: Vec<_> = reassembler.feed(&chunk).collect();

        assert_eq!(frames, vec![first, second]);
        assert_eq!(reassembler.buffered_len(), 4);

        let frames: Vec<_> = reassembler.feed(&third[4..]).collect();
        assert_eq!(frames, vec![third]);
    }

    #[test]
    fn test_byte_at_a_time() {
        let frame = latest_data_frame(9);
        let mut reassembler = Reassembler::new();

        let mut frames = Vec::new();
        for byte in frame.iter() {
            frames.extend(reassembler.feed(&[*byte]));
        }

        assert_eq!(frames, vec![frame]);
    }

    #[test]
    fn test_split_header_across_chunks() {
        let frame = status_frame(Address::FlashMemoryStatus, 1);
        let mut reassembler = Reassembler::new();

        // Garbage ending in the first header byte
        let mut first = vec![0x00, 0x11, 0x22, 0x33];
        first.push(frame[0]);
        assert_eq!(reassembler.feed(&first).count(), 0);
        assert_eq!(reassembler.buffered_len(), 1);

        let frames: Vec<_> = reassembler.feed(&frame[1..]).collect();
        assert_eq!(frames, vec![frame]);
    }

    #[test]
    fn test_garbage_without_header_is_dropped() {
        let mut reassembler = Reassembler::new();

        assert_eq!(reassembler.feed(&[0x01, 0x02, 0x03, 0x04, 0x05]).count(), 0);
        assert!(reassembler.is_empty());
    }

    #[test]
    fn test_short_garbage_waits() {
        // Fewer than 4 bytes are never scanned
        let mut reassembler = Reassembler::new();

        assert_eq!(reassembler.feed(&[0x01, 0x02]).count(), 0);
        assert_eq!(reassembler.buffered_len(), 2);

        let frame = status_frame(Address::Led, 0);
        let frames: Vec<_> = reassembler.feed(&frame).collect();
        assert_eq!(frames, vec![frame]);
    }

    #[test]
    fn test_garbage_between_frames() {
        let first = status_frame(Address::Led, 0);
        let second = status_frame(Address::FlashMemoryStatus, 2);

        let mut chunk = Vec::new();
        chunk.extend_from_slice(&first);
        chunk.extend_from_slice(&[0xDE, 0xAD, 0x42, 0x52, 0x00]);
        chunk.extend_from_slice(&second);

        let mut reassembler = Reassembler::new();
        let frames: Vec<_> = reassembler.feed(&chunk).collect();

        assert_eq!(frames, vec![first, second]);
    }

    #[test]
    fn test_corrupted_frame_is_extracted_then_rejected() {
        let mut corrupted = status_frame(Address::Led, 0).to_vec();
        corrupted[7] ^= 0xFF;
        let good = status_frame(Address::Led, 1);

        let mut chunk = corrupted.clone();
        chunk.extend_from_slice(&good);

        let mut reassembler = Reassembler::new();
        let results: Vec<_> = reassembler.feed(&chunk).map(|f| parse(&f)).collect();

        assert_eq!(results.len(), 2);
        assert!(results[0].as_ref().unwrap_err().is_integrity_failure());
        assert!(matches!(&results[1], Ok(DecodedResponse::Status(s)) if s.value == 1));
    }

    #[test]
    fn test_oversized_length_resynchronizes() {
        let mut reassembler = Reassembler::with_max_frame_size(64);
        let frame = status_frame(Address::Led, 0);

        let mut chunk = vec![0x52, 0x42, 0xFF, 0xFF, 0x00];
        chunk.extend_from_slice(&frame);

        let frames: Vec<_> = reassembler.feed(&chunk).collect();
        assert_eq!(frames, vec![frame]);
        assert!(reassembler.is_empty());
    }

    #[test]
    fn test_pending_frame_within_limit_stalls() {
        let mut reassembler = Reassembler::new();

        // Declares a 100-byte frame that never completes
        assert_eq!(reassembler.feed(&[0x52, 0x42, 0x60, 0x00, 0x01]).count(), 0);
        assert_eq!(reassembler.buffered_len(), 5);

        reassembler.reset();
        assert!(reassembler.is_empty());
    }

    #[test]
    fn test_dropped_iterator_keeps_frames() {
        let first = status_frame(Address::Led, 0);
        let second = status_frame(Address::Led, 1);

        let mut chunk = first.to_vec();
        chunk.extend_from_slice(&second);

        let mut reassembler = Reassembler::new();
        assert_eq!(reassembler.feed(&chunk).next(), Some(first));
        assert_eq!(reassembler.next_frame(), Some(second));
        assert_eq!(reassembler.next_frame(), None);
    }

    #[test]
    fn test_request_frames_reassemble() {
        let mut chunk = request::read_latest_data().to_vec();
        chunk.extend_from_slice(&request::set_led(1, 2, 3));

        let mut reassembler = Reassembler::new();
        let sizes: Vec<_> = reassembler.feed(&chunk).map(|f| f.len()).collect();

        assert_eq!(sizes, vec![9, 14]);
    }

    #[test]
    fn test_max_frame_size_floor() {
        let reassembler = Reassembler::with_max_frame_size(0);
        assert_eq!(reassembler.max_frame_size(), MIN_FRAME_SIZE);

        // A limit of exactly one minimal frame still passes requests through
        let mut reassembler = Reassembler::with_max_frame_size(5);
        let frames: Vec<_> = reassembler.feed(&request::read_flash_status()).collect();
        assert_eq!(frames.len(), 1);
        assert_eq!(&frames[0][..], &request::read_flash_status()[..]);
    }

    proptest! {
        #[test]
        fn prop_split_point_does_not_matter(sequence: u8, split in 0usize..=30) {
            let frame = latest_data_frame(sequence);

            let mut whole = Reassembler::new();
            let expected: Vec<_> = whole.feed(&frame).collect();

            let mut split_reassembler = Reassembler::new();
            let mut actual: Vec<_> = split_reassembler.feed(&frame[..split]).collect();
            actual.extend(split_reassembler.feed(&frame[split..]));

            prop_assert_eq!(&actual, &expected);
            prop_assert_eq!(parse(&actual[0]).unwrap(), parse(&expected[0]).unwrap());
        }

        #[test]
        fn prop_garbage_then_frame_yields_one_frame(
            garbage in proptest::collection::vec(
                any::<u8>().prop_filter("not a header start", |b| *b != HEADER[0]),
                0..64,
            ),
            split_garbage: bool,
        ) {
            let frame = latest_data_frame(3);
            let mut reassembler = Reassembler::new();

            let mut frames = Vec::new();
            if split_garbage {
                frames.extend(reassembler.feed(&garbage));
                frames.extend(reassembler.feed(&frame));
            } else {
                let mut chunk = garbage.clone();
                chunk.extend_from_slice(&frame);
                frames.extend(reassembler.feed(&chunk));
            }

            prop_assert_eq!(frames.len(), 1);
            let reading = parse(&frames[0]).unwrap().into_reading().unwrap();
            prop_assert_eq!(reading.sequence_number, 3);
            prop_assert!(reassembler.is_empty());
        }

        #[test]
        fn prop_arbitrary_chunking(
            values in proptest::collection::vec(any::<u8>(), 1..8),
            chunk_size in 1usize..40,
        ) {
            let frames: Vec<Bytes> = values
                .iter()
                .map(|v| status_frame(Address::FlashMemoryStatus, *v))
                .collect();
            let stream: Vec<u8> = frames.iter().flat_map(|f| f.iter().copied()).collect();

            let mut reassembler = Reassembler::new();
            let mut actual = Vec::new();
            for chunk in stream.chunks(chunk_size) {
                actual.extend(reassembler.feed(chunk));
            }

            prop_assert_eq!(actual, frames);
            prop_assert!(reassembler.is_empty());
        }
    }
}
