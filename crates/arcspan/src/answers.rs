//! The binary answer-file codec.
//!
//! A little-endian stream: `u64` pair count, then `x0, y0, x1, y1,
//! distance` as five `f64`s per pair, then one trailing `f64` average. The
//! generator writes it next to the JSON corpus so the loader can verify its
//! recomputed distances without re-deriving them.

use std::io::{self, Read, Write};

use crate::pairs::Pair;

/// The decoded answer stream.
#[derive(Debug, Clone, PartialEq)]
pub struct Answers {
    pub entries: Vec<(Pair, f64)>,
    pub average: f64,
}

/// Writes the answer stream for `entries` (pair plus its distance).
pub fn write_answers<W: Write>(
    mut writer: W,
    entries: &[(Pair, f64)],
    average: f64,
) -> io::Result<()> {
    writer.write_all(&(entries.len() as u64).to_le_bytes())?;
    for (pair, distance) in entries {
        for value in [pair.x0, pair.y0, pair.x1, pair.y1, *distance] {
            writer.write_all(&value.to_le_bytes())?;
        }
    }
    writer.write_all(&average.to_le_bytes())
}

/// Reads an answer stream back. A short stream yields the usual
/// `UnexpectedEof` error.
pub fn read_answers<R: Read>(mut reader: R) -> io::Result<Answers> {
    let count = read_u64(&mut reader)?;
    let mut entries = Vec::new();
    for _ in 0..count {
        let pair = Pair {
            x0: read_f64(&mut reader)?,
            y0: read_f64(&mut reader)?,
            x1: read_f64(&mut reader)?,
            y1: read_f64(&mut reader)?,
        };
        let distance = read_f64(&mut reader)?;
        entries.push((pair, distance));
    }
    let average = read_f64(&mut reader)?;
    Ok(Answers { entries, average })
}

fn read_u64<R: Read>(reader: &mut R) -> io::Result<u64> {
    let mut buf = [0u8; 8];
    reader.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

fn read_f64<R: Read>(reader: &mut R) -> io::Result<f64> {
    let mut buf = [0u8; 8];
    reader.read_exact(&mut buf)?;
    Ok(f64::from_le_bytes(buf))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_and_reads_back() {
        let entries = vec![
            (
                Pair {
                    x0: 1.5,
                    y0: -2.0,
                    x1: 3.25,
                    y1: 4.0,
                },
                99.5,
            ),
            (Pair::default(), 0.0),
        ];
        let mut buf = Vec::new();
        write_answers(&mut buf, &entries, 49.75).unwrap();
        assert_eq!(buf.len(), 8 + 2 * 5 * 8 + 8);

        let answers = read_answers(buf.as_slice()).unwrap();
        assert_eq!(answers.entries, entries);
        assert_eq!(answers.average, 49.75);
    }

    #[test]
    fn layout_is_little_endian() {
        let mut buf = Vec::new();
        write_answers(&mut buf, &[], 1.0).unwrap();
        assert_eq!(&buf[..8], &[0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(&buf[8..], &1.0f64.to_le_bytes());
    }

    #[test]
    fn short_stream_is_an_error() {
        let mut buf = Vec::new();
        write_answers(
            &mut buf,
            &[(Pair::default(), 0.0)],
            0.0,
        )
        .unwrap();
        buf.truncate(buf.len() - 4);
        let err = read_answers(buf.as_slice()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
