//! src/decryptor/reader.rs
//! Decoding stream: verified plaintext over a raw container
//!
//! Lifecycle: `Opened → PasswordVerifying → Ready`, with `Faulted` after any
//! failed operation and `Disposed` after [`SleReader::close`]. Only `Ready`
//! instances are handed to callers; a failed verification drops the raw stream
//! before the error is returned.

use crate::aliases::{Block16, PasswordString};
use crate::builders::DecodeOptions;
use crate::cipher::{CbcDecryptor, CipherStrategy, CounterKeystream};
use crate::consts::{BLOCK_SIZE, PASSWORD_MARKER};
use crate::decryptor::legacy::CbcReader;
use crate::error::SleError;
use crate::header::{FormatVersion, Header};
use crate::utils::read_fill;
use std::fmt;
use std::io::{self, Read, Seek, SeekFrom};
use tracing::{debug, trace, warn};

/// Lifecycle state of a [`SleReader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    Opened,
    PasswordVerifying,
    Ready,
    Faulted,
    Disposed,
}

// Field order is drop order: cipher state goes before the raw stream.
enum Engine<R> {
    Counter { keystream: CounterKeystream, raw: R },
    Cbc(CbcReader<R>),
}

impl<R> Engine<R> {
    fn into_inner(self) -> R {
        match self {
            Engine::Counter { raw, .. } => raw,
            Engine::Cbc(reader) => reader.into_inner(),
        }
    }
}

/// Readable (and, for v1.5, seekable) plaintext view of a container.
///
/// Not synchronized; one instance owns its raw stream exclusively.
///
/// # Example
///
/// ```
/// use slecrypt::aliases::PasswordString;
/// use slecrypt::{DecodeOptions, EncodeOptions, SleReader, SleWriter};
/// use std::io::{Cursor, Read, Seek, SeekFrom, Write};
///
/// let password = PasswordString::new("pw".to_string());
/// let encode = EncodeOptions::default().with_fixed_nonce(*b"device01");
///
/// let mut writer = SleWriter::new(Vec::<u8>::new(), &password, &encode)?;
/// writer.write_all(b"HELLO_WORLD_TEST")?;
/// let container = writer.finish()?;
///
/// let decode = DecodeOptions::default().with_fixed_nonce(*b"device01");
/// let mut reader = SleReader::open_with(Cursor::new(container), &password, &decode)?;
/// reader.seek(SeekFrom::Start(6))?;
/// let mut rest = String::new();
/// reader.read_to_string(&mut rest)?;
/// assert_eq!(rest, "WORLD_TEST");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct SleReader<R> {
    header: Header,
    state: StreamState,
    position: u64,
    engine: Option<Engine<R>>,
}

impl<R: Read> SleReader<R> {
    /// Open a container from a sequential source positioned at its first byte.
    ///
    /// Rejects an empty password before reading anything, then parses the
    /// header, derives the key, resolves the nonce (v1.5 only) and verifies the
    /// password. `Seek`, `len` and `position` additionally need
    /// `R: Seek` and a v1.5 container.
    pub fn from_reader(
        mut raw: R,
        password: &PasswordString,
        options: &DecodeOptions,
    ) -> Result<Self, SleError> {
        if password.expose_secret().is_empty() {
            return Err(SleError::Config("empty password".into()));
        }
        let header = Header::parse(&mut raw)?;
        let strategy = CipherStrategy::for_header(&header, password, options.nonce_source())?;

        let mut reader = SleReader {
            header,
            state: StreamState::Opened,
            position: 0,
            engine: None,
        };
        reader.verify_password(raw, strategy)?;
        Ok(reader)
    }

    fn verify_password(&mut self, mut raw: R, strategy: CipherStrategy) -> Result<(), SleError> {
        self.state = StreamState::PasswordVerifying;

        let mut block = Block16::new([0u8; BLOCK_SIZE]);
        let n = read_fill(&mut raw, block.expose_secret_mut())?;
        if n < BLOCK_SIZE {
            self.state = StreamState::Faulted;
            return Err(SleError::Header(
                "container ends before the verification block".into(),
            ));
        }

        let engine = match strategy {
            CipherStrategy::Counter(keystream) => {
                keystream.apply(0, block.expose_secret_mut());
                Engine::Counter { keystream, raw }
            }
            CipherStrategy::Cbc { cipher, padding } => {
                let mut chain = CbcDecryptor::new(cipher, &CipherStrategy::legacy_iv());
                chain.decrypt_block(block.expose_secret_mut());
                Engine::Cbc(CbcReader::new(raw, chain, padding))
            }
        };

        let diff = block
            .expose_secret()
            .iter()
            .zip(PASSWORD_MARKER.iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b));
        if diff != 0 {
            self.state = StreamState::Faulted;
            warn!(version = ?self.header.version(), "Password verification failed");
            return Err(SleError::WrongPassword);
        }

        self.engine = Some(engine);
        self.position = 0;
        self.state = StreamState::Ready;
        debug!(
            version = ?self.header.version(),
            key_bits = self.header.key_size().bits(),
            header_len = self.header.header_len(),
            "Container opened and verified"
        );
        Ok(())
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn version(&self) -> FormatVersion {
        self.header.version()
    }

    pub fn state(&self) -> StreamState {
        self.state
    }

    pub fn is_seekable(&self) -> bool {
        self.header.version().is_seekable()
    }

    /// Logical plaintext position (v1.5 only).
    pub fn position(&self) -> Result<u64, SleError> {
        if !self.is_seekable() {
            return Err(SleError::NotSupported("position on a non-seekable container version"));
        }
        self.ensure_ready()?;
        Ok(self.position)
    }

    /// Read plaintext into `buf`, returning the byte count (0 at end of stream).
    pub fn read_plain(&mut self, buf: &mut [u8]) -> Result<usize, SleError> {
        self.ensure_ready()?;

        let result = match self.engine.as_mut() {
            Some(Engine::Counter { keystream, raw }) => read_retrying(raw, buf).map(|n| {
                keystream.apply(self.position, &mut buf[..n]);
                self.position += n as u64;
                n
            }),
            Some(Engine::Cbc(reader)) => reader.read_plain(buf),
            None => Err(SleError::Disposed),
        };
        self.guard(result)
    }

    /// Release the raw stream. Safe to call any number of times.
    pub fn close(&mut self) {
        if self.state != StreamState::Disposed {
            self.engine = None;
            self.state = StreamState::Disposed;
            trace!("Decoding stream disposed");
        }
    }

    /// Give back the raw stream. Fails if the reader was closed.
    pub fn into_inner(mut self) -> Result<R, SleError> {
        self.engine
            .take()
            .map(Engine::into_inner)
            .ok_or(SleError::Disposed)
    }

    fn ensure_ready(&self) -> Result<(), SleError> {
        match self.state {
            StreamState::Ready => Ok(()),
            StreamState::Faulted => Err(SleError::Faulted),
            StreamState::Disposed => Err(SleError::Disposed),
            StreamState::Opened | StreamState::PasswordVerifying => {
                Err(SleError::NotSupported("stream has not been verified"))
            }
        }
    }

    /// Any failure leaves the stream unusable.
    fn guard<T>(&mut self, result: Result<T, SleError>) -> Result<T, SleError> {
        if result.is_err() && self.state == StreamState::Ready {
            self.state = StreamState::Faulted;
        }
        result
    }
}

impl<R: Read + Seek> SleReader<R> {
    /// Open a seekable container with default options (this device's nonce).
    pub fn open(raw: R, password: &PasswordString) -> Result<Self, SleError> {
        Self::open_with(raw, password, &DecodeOptions::default())
    }

    /// Rewind `raw` to byte 0 and open it.
    pub fn open_with(
        mut raw: R,
        password: &PasswordString,
        options: &DecodeOptions,
    ) -> Result<Self, SleError> {
        raw.seek(SeekFrom::Start(0))?;
        Self::from_reader(raw, password, options)
    }

    /// Logical plaintext length: raw length minus header and verification block,
    /// clamped at zero (v1.5 only).
    pub fn len(&mut self) -> Result<u64, SleError> {
        if !self.is_seekable() {
            return Err(SleError::NotSupported("length of a non-seekable container version"));
        }
        self.ensure_ready()?;
        let result = self.logical_len();
        self.guard(result)
    }

    pub fn is_empty(&mut self) -> Result<bool, SleError> {
        self.len().map(|len| len == 0)
    }

    /// Move to an absolute logical position (v1.5 only).
    pub fn set_position(&mut self, position: u64) -> Result<(), SleError> {
        self.seek_to(SeekFrom::Start(position)).map(|_| ())
    }

    /// Typed counterpart of [`Seek::seek`].
    ///
    /// Legacy versions always fail with [`SleError::NotSupported`], which also
    /// faults the stream.
    pub fn seek_to(&mut self, pos: SeekFrom) -> Result<u64, SleError> {
        if !self.is_seekable() {
            if self.state == StreamState::Ready {
                self.state = StreamState::Faulted;
            }
            return Err(SleError::NotSupported("seek on a non-seekable container version"));
        }
        self.ensure_ready()?;
        let result = self.seek_counter(pos);
        self.guard(result)
    }

    fn seek_counter(&mut self, pos: SeekFrom) -> Result<u64, SleError> {
        let target = match pos {
            SeekFrom::Start(p) => Some(p),
            SeekFrom::Current(delta) => self.position.checked_add_signed(delta),
            SeekFrom::End(delta) => self.logical_len()?.checked_add_signed(delta),
        }
        .ok_or_else(|| {
            SleError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                "invalid seek to a negative or overflowing position",
            ))
        })?;

        let raw_target = target
            .checked_add(self.header.payload_offset())
            .ok_or_else(|| {
                SleError::Io(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "seek position overflows the raw stream",
                ))
            })?;

        self.counter_raw()?.seek(SeekFrom::Start(raw_target))?;
        self.position = target;
        trace!(position = target, raw = raw_target, "Seeked");
        Ok(target)
    }

    fn logical_len(&mut self) -> Result<u64, SleError> {
        let offset = self.header.payload_offset();
        let resume = offset.saturating_add(self.position);
        let raw = self.counter_raw()?;
        let end = raw.seek(SeekFrom::End(0))?;
        raw.seek(SeekFrom::Start(resume))?;
        Ok(end.saturating_sub(offset))
    }

    fn counter_raw(&mut self) -> Result<&mut R, SleError> {
        match self.engine.as_mut() {
            Some(Engine::Counter { raw, .. }) => Ok(raw),
            Some(Engine::Cbc(_)) => Err(SleError::NotSupported(
                "raw access on a non-seekable container version",
            )),
            None => Err(SleError::Disposed),
        }
    }
}

impl<R: Read> Read for SleReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.read_plain(buf).map_err(Into::into)
    }
}

impl<R: Read + Seek> Seek for SleReader<R> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.seek_to(pos).map_err(Into::into)
    }
}

impl<R> fmt::Debug for SleReader<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SleReader")
            .field("header", &self.header)
            .field("state", &self.state)
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}

fn read_retrying<R: Read>(raw: &mut R, buf: &mut [u8]) -> Result<usize, SleError> {
    loop {
        match raw.read(buf) {
            Ok(n) => return Ok(n),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(SleError::Io(e)),
        }
    }
}
