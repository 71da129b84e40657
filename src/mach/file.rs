use super::val::{latin1_bytes, latin1_string};
use crate::error;
use crate::lang::ast::{OpenMode, Variable};
use crate::lang::Error;
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Read, Seek, SeekFrom, Write};

type Result<T> = std::result::Result<T, Error>;

/// Device name that sends file output to the console.
pub const SCREEN_DEVICE: &str = "SCRN:";
pub const MAX_RECORD_LEN: usize = 32767;

/// ## Open file table
///
/// Files are keyed by the number given to OPEN. Text is stored one
/// byte per character.

#[derive(Debug, Default)]
pub struct Files {
    channels: HashMap<u16, Channel>,
    columns: HashMap<u16, usize>,
}

#[derive(Debug)]
enum Channel {
    Screen,
    Reader(BufReader<File>),
    Writer(BufWriter<File>),
    Random(Record),
}

#[derive(Debug)]
struct Record {
    file: File,
    len: usize,
    fields: Vec<(usize, Variable)>,
}

impl Files {
    pub fn new() -> Files {
        Files::default()
    }

    /// Opening a number that is in use closes the old file first.
    pub fn open(
        &mut self,
        handle: u16,
        name: &str,
        mode: OpenMode,
        reclen: Option<usize>,
    ) -> Result<()> {
        if handle == 0 {
            return Err(error!(BadFileNumber));
        }
        self.close(handle)?;
        let channel = if name.eq_ignore_ascii_case(SCREEN_DEVICE) {
            match mode {
                OpenMode::Output | OpenMode::Append => Channel::Screen,
                _ => return Err(error!(BadFileMode; "SCRN: IS OUTPUT ONLY")),
            }
        } else {
            match mode {
                OpenMode::Input => Channel::Reader(BufReader::new(File::open(name)?)),
                OpenMode::Output => Channel::Writer(BufWriter::new(File::create(name)?)),
                OpenMode::Append => {
                    let file = OpenOptions::new().append(true).create(true).open(name)?;
                    Channel::Writer(BufWriter::new(file))
                }
                OpenMode::Random => {
                    let len = match reclen {
                        Some(len) if len > 0 && len <= MAX_RECORD_LEN => len,
                        _ => return Err(error!(BadRecordNumber; "RECORD LENGTH")),
                    };
                    let file = OpenOptions::new()
                        .read(true)
                        .write(true)
                        .create(true)
                        .open(name)?;
                    Channel::Random(Record {
                        file,
                        len,
                        fields: vec![],
                    })
                }
            }
        };
        self.channels.insert(handle, channel);
        self.columns.insert(handle, 0);
        Ok(())
    }

    /// False when nothing was open under `handle`.
    pub fn close(&mut self, handle: u16) -> Result<bool> {
        self.columns.remove(&handle);
        match self.channels.remove(&handle) {
            Some(Channel::Writer(mut w)) => {
                w.flush()?;
                Ok(true)
            }
            Some(_) => Ok(true),
            None => Ok(false),
        }
    }

    pub fn close_all(&mut self) -> Result<()> {
        let mut handles: Vec<u16> = self.channels.keys().copied().collect();
        handles.sort_unstable();
        let mut result = Ok(());
        for handle in handles {
            if let Err(e) = self.close(handle) {
                result = Err(e);
            }
        }
        result
    }

    pub fn is_screen(&self, handle: u16) -> Result<bool> {
        match self.channels.get(&handle) {
            Some(Channel::Screen) => Ok(true),
            Some(_) => Ok(false),
            None => Err(error!(BadFileNumber)),
        }
    }

    pub fn column(&self, handle: u16) -> usize {
        self.columns.get(&handle).copied().unwrap_or(0)
    }

    pub fn set_column(&mut self, handle: u16, column: usize) {
        self.columns.insert(handle, column);
    }

    pub fn write(&mut self, handle: u16, text: &str) -> Result<()> {
        match self.channels.get_mut(&handle) {
            Some(Channel::Writer(w)) => {
                w.write_all(&latin1_bytes(text))?;
                Ok(())
            }
            Some(_) => Err(error!(BadFileMode)),
            None => Err(error!(BadFileNumber)),
        }
    }

    /// One line without its terminator.
    pub fn read_line(&mut self, handle: u16) -> Result<String> {
        let reader = match self.channels.get_mut(&handle) {
            Some(Channel::Reader(r)) => r,
            Some(_) => return Err(error!(BadFileMode)),
            None => return Err(error!(BadFileNumber)),
        };
        let mut buf = vec![];
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Err(error!(InputPastEnd));
        }
        while buf.last() == Some(&b'\n') || buf.last() == Some(&b'\r') {
            buf.pop();
        }
        Ok(latin1_string(&buf))
    }

    pub fn eof(&mut self, handle: u16) -> Result<bool> {
        match self.channels.get_mut(&handle) {
            Some(Channel::Reader(r)) => Ok(r.fill_buf()?.is_empty()),
            Some(Channel::Random(rec)) => {
                let pos = rec.file.seek(SeekFrom::Current(0))?;
                Ok(pos >= rec.file.metadata()?.len())
            }
            Some(_) => Err(error!(BadFileMode)),
            None => Err(error!(BadFileNumber)),
        }
    }

    pub fn set_fields(&mut self, handle: u16, fields: Vec<(usize, Variable)>) -> Result<()> {
        let rec = self.record(handle)?;
        let total = fields
            .iter()
            .try_fold(0usize, |total, (len, _)| total.checked_add(*len));
        match total {
            Some(total) if total <= rec.len => {}
            _ => return Err(error!(FieldOverflow)),
        }
        rec.fields = fields;
        Ok(())
    }

    pub fn fields(&mut self, handle: u16) -> Result<Vec<(usize, Variable)>> {
        Ok(self.record(handle)?.fields.clone())
    }

    /// Reads one record. The result is shorter than the record length
    /// at the end of the file.
    pub fn get_record(&mut self, handle: u16, record: Option<usize>) -> Result<Vec<u8>> {
        let rec = self.record(handle)?;
        if let Some(n) = record {
            rec.seek(n)?;
        }
        let mut buf = vec![];
        (&mut rec.file).take(rec.len as u64).read_to_end(&mut buf)?;
        Ok(buf)
    }

    /// Writes one record padded with spaces to the record length.
    pub fn put_record(&mut self, handle: u16, record: Option<usize>, mut data: Vec<u8>) -> Result<()> {
        let rec = self.record(handle)?;
        if let Some(n) = record {
            rec.seek(n)?;
        }
        data.resize(rec.len, b' ');
        rec.file.write_all(&data)?;
        Ok(())
    }

    fn record(&mut self, handle: u16) -> Result<&mut Record> {
        match self.channels.get_mut(&handle) {
            Some(Channel::Random(rec)) => Ok(rec),
            Some(_) => Err(error!(BadFileMode)),
            None => Err(error!(BadFileNumber)),
        }
    }
}

impl Record {
    fn seek(&mut self, record: usize) -> Result<()> {
        if record < 1 {
            return Err(error!(BadRecordNumber));
        }
        self.file
            .seek(SeekFrom::Start(((record - 1) * self.len) as u64))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::Ident;

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seq.txt");
        let name = path.to_str().unwrap();
        let mut files = Files::new();
        files.open(1, name, OpenMode::Output, None).unwrap();
        files.write(1, "ONE\r\nTWO\n").unwrap();
        assert!(files.close(1).unwrap());
        assert!(!files.close(1).unwrap());
        files.open(2, name, OpenMode::Input, None).unwrap();
        assert!(!files.eof(2).unwrap());
        assert_eq!(files.read_line(2).unwrap(), "ONE");
        assert_eq!(files.read_line(2).unwrap(), "TWO");
        assert!(files.eof(2).unwrap());
        assert!(files.read_line(2).is_err());
        assert!(files.write(2, "X").is_err());
    }

    #[test]
    fn test_random_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rand.dat");
        let name = path.to_str().unwrap();
        let mut files = Files::new();
        files.open(1, name, OpenMode::Random, Some(4)).unwrap();
        let field = (4, Variable::Unary(Ident::new("A$")));
        files.set_fields(1, vec![field.clone()]).unwrap();
        assert!(files.set_fields(1, vec![field.clone(), field]).is_err());
        files.put_record(1, Some(2), b"AB".to_vec()).unwrap();
        files.put_record(1, Some(1), b"WXYZ".to_vec()).unwrap();
        assert_eq!(files.get_record(1, Some(2)).unwrap(), b"AB  ".to_vec());
        assert_eq!(files.get_record(1, Some(1)).unwrap(), b"WXYZ".to_vec());
        assert_eq!(files.get_record(1, Some(3)).unwrap(), Vec::<u8>::new());
        assert!(files.get_record(1, Some(0)).is_err());
    }

    #[test]
    fn test_missing_file() {
        let mut files = Files::new();
        let e = files
            .open(1, "/nonexistent/dir/file.txt", OpenMode::Input, None)
            .unwrap_err();
        assert_eq!(e.code(), crate::lang::ErrorCode::FileNotFound as u16);
    }

    #[test]
    fn test_screen_device() {
        let mut files = Files::new();
        files.open(3, "scrn:", OpenMode::Output, None).unwrap();
        assert!(files.is_screen(3).unwrap());
        assert!(files.is_screen(4).is_err());
    }
}
