// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Structural reader
//!
//! Drives the chunk grammar over a [`Scanner`], keeping the stack of open
//! containers and writing nodes into the [`Store`] as they are closed over.

use crate::chunk::{read_header, ChunkHeader, ChunkId, CHUNK_VERSION};
use crate::decoder::{decode_primitive, read_preamble};
use crate::scanner::Scanner;
use crate::tokenizer::decode_text;
use crate::ParseOptions;
use log::debug;
use rev_model::{
    FileInfo, Logger, NodeId, NodeType, ParseError, ProgressCallback, Result, Severity, Store,
    Symbol,
};

/// Metres per millimetre; group translations are written in millimetres
const MM_TO_M: f32 = 0.001;

/// Parse state for one buffer
pub(crate) struct Reader<'a, 'r, L: Logger + ?Sized> {
    scanner: Scanner<'a>,
    store: &'r mut Store,
    logger: &'r mut L,
    options: &'r ParseOptions,
    path: &'r str,
    /// Open containers: File, then an optional Model, then Groups
    stack: Vec<NodeId>,
    progress: Option<&'r ProgressCallback>,
}

impl<'a, 'r, L: Logger + ?Sized> Reader<'a, 'r, L> {
    pub fn new(
        bytes: &'a [u8],
        store: &'r mut Store,
        logger: &'r mut L,
        options: &'r ParseOptions,
        path: &'r str,
    ) -> Self {
        Self {
            scanner: Scanner::new(bytes),
            store,
            logger,
            options,
            path,
            stack: Vec::new(),
            progress: None,
        }
    }

    pub fn with_progress(mut self, progress: &'r ProgressCallback) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Parse the whole buffer, returning the new File node
    pub fn run(mut self) -> Result<NodeId> {
        debug!("parsing {} ({} bytes)", self.path, self.scanner.len());

        let header = read_header(&mut self.scanner)?
            .ok_or_else(|| ParseError::grammar("Empty or invalid file"))?;
        if ChunkId::parse(&header.token) != Some(ChunkId::Head) {
            return Err(ParseError::grammar(format!(
                "Expected HEAD, got '{}'",
                header.token
            )));
        }
        self.check_version(&header)?;
        let file = self.parse_head()?;
        self.report_progress("Reading chunks");

        let mut ended = false;
        while let Some(header) = read_header(&mut self.scanner)? {
            let id = header.id()?;
            self.check_version(&header)?;
            debug!("{id} at line {}", self.scanner.line_number());

            match id {
                ChunkId::End => {
                    self.pop_if(NodeType::Model);
                    ended = true;
                    break;
                }
                ChunkId::Head => {
                    return Err(ParseError::grammar("HEAD encountered but stack not empty"));
                }
                ChunkId::Modl => self.parse_model()?,
                ChunkId::Cntb => self.parse_group(1)?,
                ChunkId::Cnte => self.anomaly("Unexpected CNTE at root level, ignoring.")?,
                ChunkId::Prim | ChunkId::Obst | ChunkId::Insu => {
                    return Err(ParseError::grammar(format!(
                        "Geometry chunk '{id}' outside of any group"
                    )));
                }
            }
            self.report_progress("Reading chunks");
        }

        if !ended {
            self.anomaly("missing END: chunk")?;
        }

        self.pop_if(NodeType::Model);
        self.pop_if(NodeType::File);
        if !self.stack.is_empty() {
            self.anomaly("non-empty stack at end (ignored)")?;
        }

        self.store.update_counts();
        self.report_progress("Complete");
        Ok(file)
    }

    fn parse_head(&mut self) -> Result<NodeId> {
        if !self.stack.is_empty() {
            return Err(ParseError::grammar("HEAD encountered but stack not empty"));
        }
        let info = self.read_text("HEAD info")?;
        let note = self.read_text("HEAD note")?;
        let date = self.read_text("HEAD date")?;
        let user = self.read_text("HEAD user")?;
        let encoding = self.store.intern("");
        let path = self.store.intern(self.path);

        let file = self.store.new_file(FileInfo {
            info,
            note,
            date,
            user,
            encoding,
            path,
        });
        self.stack.push(file);
        Ok(file)
    }

    fn parse_model(&mut self) -> Result<()> {
        // models have no end marker; a new one closes the previous
        self.pop_if(NodeType::Model);
        let parent = match self.top() {
            Some((id, NodeType::File)) => id,
            _ => return Err(ParseError::grammar("MODL without HEAD/File")),
        };

        let project = self.read_text("MODL project")?;
        let name = self.read_text("MODL name")?;
        let model = self.store.new_model(parent, project, name)?;
        self.stack.push(model);
        Ok(())
    }

    fn parse_group(&mut self, depth: usize) -> Result<()> {
        if depth > self.options.max_depth {
            return Err(ParseError::grammar(format!(
                "CNTB nesting exceeds maximum depth {} at line {}",
                self.options.max_depth,
                self.scanner.line_number()
            )));
        }
        let parent = match self.top() {
            Some((id, NodeType::Model | NodeType::Group)) => id,
            _ => return Err(ParseError::grammar("CNTB without valid parent (Model/Group)")),
        };

        let name = self.read_text("CNTB name")?;
        let translation = self
            .scanner
            .read_record::<3>("CNTB translation")?
            .map(|mm| mm * MM_TO_M);
        let material = self.scanner.read_u32("CNTB material")?;
        self.scanner.finish_line();

        let group = self.store.new_group(parent, name, translation, material)?;
        self.stack.push(group);

        loop {
            let header = read_header(&mut self.scanner)?
                .ok_or_else(|| ParseError::unexpected_eof("while reading children of CNTB"))?;
            let id = header.id()?;
            self.check_version(&header)?;

            match id {
                ChunkId::Cnte => break,
                ChunkId::Cntb => self.parse_group(depth + 1)?,
                ChunkId::Prim | ChunkId::Obst | ChunkId::Insu => self.parse_primitive(id)?,
                other => {
                    return Err(ParseError::grammar(format!(
                        "CNTB: unexpected chunk '{other}'"
                    )));
                }
            }
        }

        self.stack.pop();
        Ok(())
    }

    fn parse_primitive(&mut self, id: ChunkId) -> Result<()> {
        let outside = || ParseError::grammar(format!("Geometry chunk '{id}' outside of any group"));
        let class = id.geometry_class().ok_or_else(outside)?;
        let parent = match self.top() {
            Some((group, NodeType::Group)) => group,
            _ => return Err(outside()),
        };

        let preamble = read_preamble(&mut self.scanner)?;
        let primitive = decode_primitive(preamble.kind, &mut self.scanner, self.store)?;
        self.store.new_geometry(
            parent,
            class,
            preamble.transform,
            preamble.bbox_local,
            primitive,
        )?;
        Ok(())
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn read_text(&mut self, context: &'static str) -> Result<Symbol> {
        let line = self.scanner.expect_line(context)?;
        Ok(self.store.intern(&decode_text(line)))
    }

    fn top(&self) -> Option<(NodeId, NodeType)> {
        let id = *self.stack.last()?;
        Some((id, self.store.get(id)?.node_type()))
    }

    fn pop_if(&mut self, ty: NodeType) {
        if matches!(self.top(), Some((_, top)) if top == ty) {
            self.stack.pop();
        }
    }

    fn check_version(&self, header: &ChunkHeader<'_>) -> Result<()> {
        if self.options.validate_chunk_version && header.version != CHUNK_VERSION {
            return Err(ParseError::grammar(format!(
                "Chunk '{}' has version {} {}, expected {} {}",
                header.token,
                header.version[0],
                header.version[1],
                CHUNK_VERSION[0],
                CHUNK_VERSION[1]
            )));
        }
        Ok(())
    }

    /// Tolerated irregularity: a warning, or an error when parsing strictly
    fn anomaly(&mut self, message: &str) -> Result<()> {
        if self.options.strict {
            return Err(ParseError::strict(message));
        }
        self.logger.log(Severity::Warning, message);
        Ok(())
    }

    fn report_progress(&self, phase: &str) {
        if let Some(on_progress) = self.progress {
            let len = self.scanner.len();
            let percent = if len == 0 {
                100.0
            } else {
                (self.scanner.position() as f64 * 100.0 / len as f64) as f32
            };
            on_progress(phase, percent.min(100.0));
        }
    }
}
