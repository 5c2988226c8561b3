//! Boundary checks for the site backend library.
//!
//! Every `.rs` file under `backend/src/{domain,inbound,outbound}` is parsed
//! and each path it mentions is matched against the rules for its zone:
//!
//! - [`Rule::Layering`]: the domain never reaches adapters, the web
//!   framework, the relay client or the metrics backend. Inbound handlers
//!   never reach outbound adapters, and outbound adapters never reach Actix.
//! - [`Rule::WallClock`]: domain code reads time through `mockable::Clock`
//!   so cooldown windows stay testable.
//! - [`Rule::PureRules`]: the contact validators and the page routing table
//!   are plain functions with no I/O, logging, async runtime or port access.
//!
//! Run it with `cargo run -p architecture-lint [BACKEND_DIR]`.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use syn::visit::Visit;

mod rules;

pub use rules::{Rule, Zone};
use rules::{Target, rules_for};

/// Name the backend library is imported under from tests and binaries.
const LIBRARY_CRATE: &str = "site_backend";

/// Top-level library modules the lint reads.
const LINTED_ROOTS: [&str; 3] = ["domain", "inbound", "outbound"];

/// A boundary violation in one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// File path relative to `backend/src`.
    pub file: PathBuf,
    /// Rule that was broken.
    pub rule: Rule,
    /// Offending path as written, e.g. `chrono::Utc::now`.
    pub path: String,
    /// Human-readable explanation.
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: [{}] {}",
            self.file.display(),
            self.rule.as_str(),
            self.message
        )
    }
}

/// Failure modes returned by the lint.
#[derive(Debug, thiserror::Error)]
pub enum ArchitectureLintError {
    /// Directory traversal or file reading failed.
    #[error("failed to read backend sources: {0}")]
    Io(#[from] io::Error),
    /// A file sits outside the linted zones.
    #[error("{}: not under domain/, inbound/ or outbound/", .file.display())]
    UnknownZone { file: PathBuf },
    /// A file is not valid Rust.
    #[error("failed to parse {}: {message}", .file.display())]
    Parse { file: PathBuf, message: String },
    /// One or more rules were broken.
    #[error("{}", render_violations(.0))]
    Violations(Vec<Violation>),
}

fn render_violations(violations: &[Violation]) -> String {
    let mut rendered = format!("{} architecture violation(s):", violations.len());
    for violation in violations {
        rendered.push_str("\n- ");
        rendered.push_str(&violation.to_string());
    }
    rendered
}

/// Summary of a clean run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LintReport {
    /// Number of files parsed.
    pub files_checked: usize,
}

/// A Rust source file to lint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintSource {
    /// Path relative to `backend/src`.
    pub file: PathBuf,
    pub contents: String,
}

impl LintSource {
    /// Build a source from a relative path and its contents.
    pub fn new(file: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            contents: contents.into(),
        }
    }
}

/// Lint the backend library rooted at `backend_dir`.
///
/// # Errors
///
/// Returns [`ArchitectureLintError::Violations`] listing every broken rule,
/// or an I/O or parse error when a source cannot be read.
pub fn lint_backend_sources(backend_dir: &Path) -> Result<LintReport, ArchitectureLintError> {
    let src_dir = backend_dir.join("src");
    let mut sources = Vec::new();
    for root in LINTED_ROOTS {
        let dir = src_dir.join(root);
        if dir.is_dir() {
            collect_sources(&src_dir, &dir, &mut sources)?;
        }
    }
    lint_sources(&sources)
}

/// Lint in-memory sources.
///
/// Violations from every file are gathered before failing, sorted by file
/// and then by offending path.
///
/// # Errors
///
/// See [`lint_backend_sources`].
pub fn lint_sources(sources: &[LintSource]) -> Result<LintReport, ArchitectureLintError> {
    let mut violations = Vec::new();
    for source in sources {
        let zone = Zone::of(&source.file).ok_or_else(|| ArchitectureLintError::UnknownZone {
            file: source.file.clone(),
        })?;
        let parsed =
            syn::parse_file(&source.contents).map_err(|err| ArchitectureLintError::Parse {
                file: source.file.clone(),
                message: err.to_string(),
            })?;
        violations.extend(check_file(&source.file, zone, &parsed));
    }

    if violations.is_empty() {
        Ok(LintReport {
            files_checked: sources.len(),
        })
    } else {
        violations.sort_by(|a, b| (&a.file, &a.path).cmp(&(&b.file, &b.path)));
        Err(ArchitectureLintError::Violations(violations))
    }
}

fn check_file(file: &Path, zone: Zone, parsed: &syn::File) -> Vec<Violation> {
    let module = module_path(file);
    let mut collector = PathCollector::default();
    collector.visit_file(parsed);

    let mut seen = BTreeSet::new();
    let mut violations = Vec::new();
    for written in &collector.paths {
        let reference = Reference::resolve(&module, written);
        for rule in rules_for(zone) {
            if !rule.target.matches(&reference) {
                continue;
            }
            let path = written.join("::");
            if seen.insert((rule.rule, path.clone())) {
                violations.push(Violation {
                    file: file.to_path_buf(),
                    rule: rule.rule,
                    message: format!(
                        "{} code must not use `{path}`: {}",
                        zone.as_str(),
                        rule.reason
                    ),
                    path,
                });
            }
        }
    }
    violations
}

/// Module path of a file, e.g. `domain/contact/mod.rs` → `domain::contact`.
fn module_path(file: &Path) -> Vec<String> {
    let mut segments: Vec<String> = file
        .iter()
        .map(|part| part.to_string_lossy().into_owned())
        .collect();
    if let Some(last) = segments.pop() {
        let stem = last.strip_suffix(".rs").unwrap_or(last.as_str());
        if stem != "mod" {
            segments.push(stem.to_owned());
        }
    }
    segments
}

/// A path as the lint understands it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Reference {
    /// A module inside the backend library, from its root.
    Internal(Vec<String>),
    /// Anything else: external crates, std, or names brought in by `use`.
    External(Vec<String>),
}

impl Reference {
    fn resolve(module: &[String], written: &[String]) -> Self {
        let Some(first) = written.first() else {
            return Self::External(Vec::new());
        };
        match first.as_str() {
            "crate" | LIBRARY_CRATE => Self::Internal(written.iter().skip(1).cloned().collect()),
            "self" | "super" => {
                let mut base = module.to_vec();
                let mut rest = written.iter().peekable();
                while let Some(segment) = rest.next_if(|s| matches!(s.as_str(), "self" | "super"))
                {
                    if segment == "super" {
                        base.pop();
                    }
                }
                base.extend(rest.cloned());
                Self::Internal(base)
            }
            root if LINTED_ROOTS.contains(&root) => Self::Internal(written.to_vec()),
            _ => Self::External(written.to_vec()),
        }
    }
}

impl Target {
    pub(crate) fn matches(&self, reference: &Reference) -> bool {
        match (self, reference) {
            (Self::Module(prefix), Reference::Internal(path)) => starts_with(path, prefix),
            (Self::Crate(name), Reference::External(path)) => {
                path.first().is_some_and(|root| root == name)
            }
            (Self::Call(call), Reference::External(path)) => path
                .windows(call.len())
                .any(|window| window.iter().zip(call.iter()).all(|(a, b)| a == b)),
            _ => false,
        }
    }
}

fn starts_with(path: &[String], prefix: &[&str]) -> bool {
    path.len() >= prefix.len() && path.iter().zip(prefix).all(|(a, b)| a == b)
}

#[derive(Default)]
struct PathCollector {
    paths: BTreeSet<Vec<String>>,
}

impl PathCollector {
    fn record_use_tree(&mut self, tree: &syn::UseTree, mut prefix: Vec<String>) {
        match tree {
            syn::UseTree::Path(path) => {
                prefix.push(path.ident.to_string());
                self.record_use_tree(&path.tree, prefix);
            }
            syn::UseTree::Name(name) => {
                prefix.push(name.ident.to_string());
                self.paths.insert(prefix);
            }
            syn::UseTree::Rename(rename) => {
                prefix.push(rename.ident.to_string());
                self.paths.insert(prefix);
            }
            syn::UseTree::Glob(_) => {
                self.paths.insert(prefix);
            }
            syn::UseTree::Group(group) => {
                for item in &group.items {
                    self.record_use_tree(item, prefix.clone());
                }
            }
        }
    }
}

impl<'ast> Visit<'ast> for PathCollector {
    fn visit_path(&mut self, node: &'ast syn::Path) {
        let segments: Vec<String> = node
            .segments
            .iter()
            .map(|segment| segment.ident.to_string())
            .collect();
        if !segments.is_empty() {
            self.paths.insert(segments);
        }
        syn::visit::visit_path(self, node);
    }

    fn visit_item_use(&mut self, node: &'ast syn::ItemUse) {
        self.record_use_tree(&node.tree, Vec::new());
    }
}

fn collect_sources(
    src_root: &Path,
    dir: &Path,
    sources: &mut Vec<LintSource>,
) -> Result<(), ArchitectureLintError> {
    let mut entries = fs::read_dir(dir)?.collect::<Result<Vec<_>, _>>()?;
    entries.sort_by_key(fs::DirEntry::path);
    for entry in entries {
        let path = entry.path();
        if path.is_dir() {
            collect_sources(src_root, &path, sources)?;
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            let relative = path.strip_prefix(src_root).unwrap_or(path.as_path()).to_path_buf();
            sources.push(LintSource::new(relative, fs::read_to_string(&path)?));
        }
    }
    Ok(())
}
