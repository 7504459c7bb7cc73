use std::fs::File;
use std::io::Cursor;
use std::io::Seek;
use std::io::SeekFrom;

/// BodyLength reports how many bytes a body will send from its current position.
///
/// The default implementation seeks to the end and back, leaving the position
/// where it was. Types that know their size override it.
pub trait BodyLength: Seek {
    /// Number of bytes between the current position and the end.
    fn length(&mut self) -> std::io::Result<u64> {
        seek_length(self)
    }
}

/// Measure the remaining bytes of a seekable stream without moving it.
pub fn seek_length<S: Seek + ?Sized>(stream: &mut S) -> std::io::Result<u64> {
    let pos = stream.stream_position()?;
    let end = stream.seek(SeekFrom::End(0))?;
    stream.seek(SeekFrom::Start(pos))?;

    Ok(end.saturating_sub(pos))
}

impl BodyLength for File {}

impl<T: AsRef<[u8]>> BodyLength for Cursor<T> {
    fn length(&mut self) -> std::io::Result<u64> {
        let len = self.get_ref().as_ref().len() as u64;
        Ok(len.saturating_sub(self.position()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use std::io::Write;

    /// Stream that only exposes Seek, so the default implementation is used.
    struct Opaque(Cursor<Vec<u8>>);

    impl Seek for Opaque {
        fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
            self.0.seek(pos)
        }
    }

    impl BodyLength for Opaque {}

    #[test]
    fn test_cursor_length() {
        let mut body = Cursor::new(b"hello world".to_vec());
        assert_eq!(body.length().unwrap(), 11);

        let mut buf = [0; 6];
        body.read_exact(&mut buf).unwrap();
        assert_eq!(body.length().unwrap(), 5);
    }

    #[test]
    fn test_default_length_keeps_position() {
        let mut body = Opaque(Cursor::new(b"0123456789".to_vec()));
        body.seek(SeekFrom::Start(4)).unwrap();

        assert_eq!(body.length().unwrap(), 6);
        assert_eq!(body.stream_position().unwrap(), 4);
    }

    #[test]
    fn test_file_length() {
        let mut file = tempfile::tempfile().unwrap();
        file.write_all(b"abcdef").unwrap();

        file.seek(SeekFrom::Start(2)).unwrap();
        assert_eq!(file.length().unwrap(), 4);
        assert_eq!(file.stream_position().unwrap(), 2);
    }
}
