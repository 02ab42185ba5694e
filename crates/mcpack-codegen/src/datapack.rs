//! The registration surface and the build pipeline.
//!
//! A [`Datapack`] collects explicitly named functions, load/tick entries,
//! static files and pack metadata. [`Datapack::build`] runs discovery,
//! naming, optimization and emission with fresh state every time, so it can
//! be called repeatedly and yields identical output for identical input.

use std::collections::BTreeMap;
use std::rc::Rc;

use mcpack_common::{BuildError, Diagnostic, IdPrefix, Identifier, TagRef};
use rustc_hash::FxHashMap;

use crate::build::{build_graph, BuildContext};
use crate::emit::{emit, PackMeta};
use crate::ir::{Command, Function, FunctionHandle};
use crate::opt::{optimize, rename, OptimizeOptions, OptimizeStats};
use crate::text_map::TagValue;

#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Where anonymous functions are named. Required once any anonymous
    /// function is reachable.
    pub internal: Option<IdPrefix>,
    pub optimize: OptimizeOptions,
    pub pack_meta: Option<PackMeta>,
    /// `replace` flag of the emitted load tag.
    pub replace_load: bool,
    /// `replace` flag of the emitted tick tag.
    pub replace_tick: bool,
}

impl BuildOptions {
    pub fn with_internal(internal: impl Into<IdPrefix>) -> Self {
        Self {
            internal: Some(internal.into()),
            ..Self::default()
        }
    }
}

/// Something that can run on load or every tick.
#[derive(Debug, Clone)]
pub enum TagEntry {
    /// A function by identifier, possibly defined outside this build.
    Id(Identifier),
    /// A whole function tag.
    Tag(TagRef),
    /// A function declared in this build, named wherever it ends up.
    Function(FunctionHandle),
}

impl From<Identifier> for TagEntry {
    fn from(id: Identifier) -> Self {
        TagEntry::Id(id)
    }
}

impl From<TagRef> for TagEntry {
    fn from(tag: TagRef) -> Self {
        TagEntry::Tag(tag)
    }
}

impl From<FunctionHandle> for TagEntry {
    fn from(function: FunctionHandle) -> Self {
        TagEntry::Function(function)
    }
}

impl From<&FunctionHandle> for TagEntry {
    fn from(function: &FunctionHandle) -> Self {
        TagEntry::Function(function.clone())
    }
}

#[derive(Debug)]
pub struct BuildOutput {
    /// Output path to file content, in path order.
    pub files: BTreeMap<String, String>,
    pub diagnostics: Vec<Diagnostic>,
    pub stats: OptimizeStats,
}

#[derive(Debug, Default)]
pub struct Datapack {
    options: BuildOptions,
    /// Explicit functions in registration order.
    functions: Vec<(Identifier, FunctionHandle)>,
    by_id: FxHashMap<Identifier, usize>,
    by_identity: FxHashMap<usize, usize>,
    load: Vec<TagEntry>,
    tick: Vec<TagEntry>,
    static_files: BTreeMap<String, String>,
}

impl Datapack {
    pub fn new(options: BuildOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Register `function` under a caller-chosen identifier. Registered
    /// functions are always emitted and never inlined.
    pub fn register(
        &mut self,
        id: Identifier,
        function: FunctionHandle,
    ) -> Result<FunctionHandle, BuildError> {
        if self.by_id.contains_key(&id) {
            return Err(BuildError::DuplicateFunction(id));
        }
        let identity = Rc::as_ptr(&function) as usize;
        if let Some(&index) = self.by_identity.get(&identity) {
            return Err(BuildError::AliasedFunction {
                first: self.functions[index].0.clone(),
                second: id,
            });
        }

        let index = self.functions.len();
        self.by_id.insert(id.clone(), index);
        self.by_identity.insert(identity, index);
        self.functions.push((id, function.clone()));
        Ok(function)
    }

    /// Create and register a function with the given body.
    pub fn function(
        &mut self,
        id: Identifier,
        commands: impl IntoIterator<Item = Command>,
    ) -> Result<FunctionHandle, BuildError> {
        let function = Function::with_commands(id.path(), commands);
        self.register(id, function)
    }

    pub fn get(&self, id: &Identifier) -> Option<&FunctionHandle> {
        self.by_id.get(id).map(|&index| &self.functions[index].1)
    }

    pub fn add_on_load(&mut self, entry: impl Into<TagEntry>) {
        self.load.push(entry.into());
    }

    pub fn add_on_tick(&mut self, entry: impl Into<TagEntry>) {
        self.tick.push(entry.into());
    }

    /// Add a file copied to the output unchanged. Generated files at the
    /// same path take precedence.
    pub fn add_static_file(&mut self, path: impl Into<String>, content: impl Into<String>) {
        self.static_files.insert(path.into(), content.into());
    }

    pub fn set_pack_meta(&mut self, meta: PackMeta) {
        self.options.pack_meta = Some(meta);
    }

    /// Make the load tag replace, rather than extend, lower-priority packs'
    /// load tags.
    pub fn set_load_replace(&mut self, replace: bool) {
        self.options.replace_load = replace;
    }

    pub fn set_tick_replace(&mut self, replace: bool) {
        self.options.replace_tick = replace;
    }

    pub fn build(&self) -> Result<BuildOutput, BuildError> {
        let mut ctx = BuildContext::new();
        for (id, function) in &self.functions {
            ctx.seed_explicit(id.clone(), function);
        }
        let load = tag_values(&mut ctx, &self.load);
        let tick = tag_values(&mut ctx, &self.tick);

        let graph = build_graph(&mut ctx);
        let diagnostics = ctx.take_diagnostics();

        let mut map = rename(graph, self.options.internal.as_ref(), load, tick)?;
        map.load.replace = self.options.replace_load;
        map.tick.replace = self.options.replace_tick;
        let stats = optimize(&mut map, &self.options.optimize);
        let files = emit(&map, &self.static_files, self.options.pack_meta.as_ref())?;

        tracing::debug!(
            functions = map.len(),
            files = files.len(),
            diagnostics = diagnostics.len(),
            "datapack built"
        );
        Ok(BuildOutput {
            files,
            diagnostics,
            stats,
        })
    }
}

fn tag_values(ctx: &mut BuildContext, entries: &[TagEntry]) -> Vec<TagValue> {
    entries
        .iter()
        .map(|entry| match entry {
            TagEntry::Id(id) => TagValue::Id(id.clone()),
            TagEntry::Tag(tag) => TagValue::Tag(tag.clone()),
            TagEntry::Function(function) => TagValue::Function(ctx.discover(function)),
        })
        .collect()
}
