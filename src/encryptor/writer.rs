//! src/encryptor/writer.rs
//! Encoding stream: header, verification block, then encrypted payload

use crate::aliases::{Block16, PasswordString};
use crate::builders::EncodeOptions;
use crate::cipher::{CbcEncryptor, CipherStrategy, CounterKeystream, Padding};
use crate::consts::{BLOCK_SIZE, COPY_CHUNK_SIZE, PASSWORD_MARKER};
use crate::decryptor::StreamState;
use crate::error::SleError;
use crate::header::{FormatVersion, Header};
use std::fmt;
use std::io::{self, Write};
use tracing::{debug, trace, warn};

enum WriteEngine {
    Counter(CounterKeystream),
    Cbc {
        chain: CbcEncryptor,
        padding: Padding,
        pending: Vec<u8>,
    },
}

/// Writes a new container to `W`.
///
/// Call [`SleWriter::finish`] to emit the final padding block (legacy
/// versions) and get the output back. A writer dropped without `finish` is
/// finished best-effort, and any error there is only logged.
pub struct SleWriter<W: Write> {
    header: Header,
    engine: WriteEngine,
    position: u64,
    state: StreamState,
    scratch: Vec<u8>,
    inner: Option<W>,
}

impl<W: Write> SleWriter<W> {
    /// Validate `options`, then write the header and the verification block.
    ///
    /// Configuration errors (empty password, over-long file name, unavailable
    /// device id) are reported before anything reaches `output`.
    pub fn new(
        mut output: W,
        password: &PasswordString,
        options: &EncodeOptions,
    ) -> Result<Self, SleError> {
        if password.expose_secret().is_empty() {
            return Err(SleError::Config("empty password".into()));
        }

        let header = Header::new(options.version(), options.key_size(), options.file_name())?;
        let strategy = CipherStrategy::for_header(&header, password, options.nonce_source())?;

        let mut marker = Block16::new(PASSWORD_MARKER);
        let engine = match strategy {
            CipherStrategy::Counter(keystream) => {
                keystream.apply(0, marker.expose_secret_mut());
                WriteEngine::Counter(keystream)
            }
            CipherStrategy::Cbc { cipher, padding } => {
                let mut chain = CbcEncryptor::new(cipher, &CipherStrategy::legacy_iv());
                chain.encrypt_block(marker.expose_secret_mut());
                WriteEngine::Cbc {
                    chain,
                    padding,
                    pending: Vec::with_capacity(BLOCK_SIZE),
                }
            }
        };

        header.write_to(&mut output)?;
        output.write_all(marker.expose_secret())?;

        debug!(
            version = ?header.version(),
            key_bits = header.key_size().bits(),
            header_len = header.header_len(),
            "Container header written"
        );

        Ok(Self {
            header,
            engine,
            position: 0,
            state: StreamState::Ready,
            scratch: Vec::new(),
            inner: Some(output),
        })
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

    /// Plaintext bytes accepted so far.
    pub fn bytes_written(&self) -> u64 {
        self.position
    }

    /// Encrypt `buf` and forward it. Always consumes all of `buf` on success.
    pub fn write_plain(&mut self, buf: &[u8]) -> Result<usize, SleError> {
        self.ensure_ready()?;
        let result = self.encrypt_and_write(buf);
        self.guard(result)
    }

    /// Emit the final block, flush, and return the output.
    pub fn finish(mut self) -> Result<W, SleError> {
        self.ensure_ready()?;
        let result = self.write_final_block();
        self.guard(result)?;
        self.state = StreamState::Disposed;
        self.inner.take().ok_or(SleError::Disposed)
    }

    fn encrypt_and_write(&mut self, buf: &[u8]) -> Result<usize, SleError> {
        let Some(output) = self.inner.as_mut() else {
            return Err(SleError::Disposed);
        };

        match &mut self.engine {
            WriteEngine::Counter(keystream) => {
                let mut position = self.position;
                for chunk in buf.chunks(COPY_CHUNK_SIZE) {
                    self.scratch.clear();
                    self.scratch.extend_from_slice(chunk);
                    keystream.apply(position, &mut self.scratch);
                    output.write_all(&self.scratch)?;
                    position += chunk.len() as u64;
                }
            }
            WriteEngine::Cbc { chain, pending, .. } => {
                let mut input = buf;

                // Top up a partial block left by an earlier call first.
                if !pending.is_empty() {
                    let take = (BLOCK_SIZE - pending.len()).min(input.len());
                    pending.extend_from_slice(&input[..take]);
                    input = &input[take..];
                    if pending.len() < BLOCK_SIZE {
                        self.position += buf.len() as u64;
                        return Ok(buf.len());
                    }
                    let mut block = [0u8; BLOCK_SIZE];
                    block.copy_from_slice(pending.as_slice());
                    pending.clear();
                    chain.encrypt_block(&mut block);
                    output.write_all(&block)?;
                }

                let mut blocks = input.chunks_exact(BLOCK_SIZE);
                self.scratch.clear();
                for chunk in &mut blocks {
                    let mut block = [0u8; BLOCK_SIZE];
                    block.copy_from_slice(chunk);
                    chain.encrypt_block(&mut block);
                    self.scratch.extend_from_slice(&block);
                    if self.scratch.len() >= COPY_CHUNK_SIZE {
                        output.write_all(&self.scratch)?;
                        self.scratch.clear();
                    }
                }
                output.write_all(&self.scratch)?;
                pending.extend_from_slice(blocks.remainder());
            }
        }

        self.position += buf.len() as u64;
        Ok(buf.len())
    }

    fn write_final_block(&mut self) -> Result<(), SleError> {
        let Some(output) = self.inner.as_mut() else {
            return Err(SleError::Disposed);
        };

        if let WriteEngine::Cbc {
            chain,
            padding,
            pending,
        } = &mut self.engine
        {
            if let Some(mut block) = padding.pad(pending.as_slice()) {
                chain.encrypt_block(&mut block);
                output.write_all(&block)?;
            }
            pending.clear();
        }
        output.flush()?;

        debug!(
            version = ?self.header.version(),
            bytes = self.position,
            "Container finished"
        );
        Ok(())
    }

    fn ensure_ready(&self) -> Result<(), SleError> {
        match self.state {
            StreamState::Ready => Ok(()),
            StreamState::Faulted => Err(SleError::Faulted),
            _ => Err(SleError::Disposed),
        }
    }

    fn guard<T>(&mut self, result: Result<T, SleError>) -> Result<T, SleError> {
        if result.is_err() && self.state == StreamState::Ready {
            self.state = StreamState::Faulted;
        }
        result
    }
}

impl<W: Write> Write for SleWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_plain(buf).map_err(Into::into)
    }

    /// Flushes the output. Buffered legacy bytes stay pending until `finish`.
    fn flush(&mut self) -> io::Result<()> {
        self.ensure_ready()?;
        match self.inner.as_mut() {
            Some(output) => output.flush(),
            None => Err(SleError::Disposed.into()),
        }
    }
}

impl<W: Write> Drop for SleWriter<W> {
    fn drop(&mut self) {
        if self.state != StreamState::Ready || self.inner.is_none() {
            return;
        }
        match self.write_final_block() {
            Ok(()) => trace!("Unfinished container finished on drop"),
            Err(e) => warn!(error = %e, "Failed to finish container on drop"),
        }
        self.state = StreamState::Disposed;
    }
}

impl<W: Write> fmt::Debug for SleWriter<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SleWriter")
            .field("header", &self.header)
            .field("state", &self.state)
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}
