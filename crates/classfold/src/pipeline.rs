//! End-to-end merge of a document and its stylesheet.

use std::fmt;
use std::path::Path;

use classfold_core::apply::CoverApplier;
use classfold_core::decompose::{DecompositionStats, decompose};
use classfold_core::logging::PerfSpan;
use classfold_core::matrix::MatrixBuilder;
use classfold_core::target::ClassNamespace;
use classfold_markup::{Document, ElementHandle};
use classfold_style::rules::{StyleItem, StyleSheet};
use classfold_style::{emit, project};

use crate::{Config, Error, Result};

const TARGET: &str = "classfold::pipeline";

/// Summary of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Distinct declarations of namespaced class rules (matrix rows).
    pub declarations: usize,
    /// Elements carrying a namespaced class (matrix columns).
    pub relevant_elements: usize,
    /// Generated rules written.
    pub rules: usize,
    /// Elements whose class attribute changed.
    pub modified_elements: usize,
    /// Stylesheet items copied through.
    pub passthrough_items: usize,
    /// Decomposition statistics; all zero when nothing was merged.
    pub stats: DecompositionStats,
}

impl Report {
    /// Returns true if no rule was generated and no element was rewritten.
    pub fn is_unchanged(&self) -> bool {
        self.rules == 0 && self.modified_elements == 0
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} declarations x {} elements -> {} rules ({} elements rewritten, {} fallbacks)",
            self.declarations,
            self.relevant_elements,
            self.rules,
            self.modified_elements,
            self.stats.fallbacks()
        )
    }
}

/// Result of [`Optimizer::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    /// The rewritten document.
    pub markup: String,
    /// The new stylesheet.
    pub css: String,
    /// What happened.
    pub report: Report,
}

/// Runs the parse, project, build, decompose, apply and emit stages.
#[derive(Debug, Clone)]
pub struct Optimizer {
    config: Config,
    namespace: ClassNamespace,
}

impl Optimizer {
    /// Create an optimizer; fails if the configuration is invalid.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let namespace = config.namespace();
        Ok(Self { config, namespace })
    }

    /// The configuration in use.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Merge `css` into `markup`.
    ///
    /// With no relevant element or no namespaced declaration the cover is
    /// empty: namespaced classes are still stripped from the relevant
    /// elements and the stylesheet holds only the passthrough items.
    pub fn run(&self, markup: &str, css: &str) -> Result<Output> {
        let _span = PerfSpan::new("optimize");

        let sheet = StyleSheet::from_css(css)?;
        let mut document = Document::parse(markup)?;

        let projection = project(&sheet, &self.namespace, self.config.selector_policy)?;
        let relevant = document.elements_in(&self.namespace);
        let applier =
            CoverApplier::new(&self.namespace).with_rule_prefix(&self.config.rule_prefix);

        let built = MatrixBuilder::new(&projection.declarations).build(&document, &relevant);
        let (rules, stats) = match built {
            Ok(mut built) => {
                self.check_collisions(&document)?;
                let cover = decompose(&mut built.matrix, self.config.decompose_options())?;
                let rules = applier.apply(cover.items(), &built.tables, &mut document);
                (rules, *cover.stats())
            }
            Err(e) if e.is_empty_input() => {
                tracing::info!(target: TARGET, "{e}; no rules to generate");
                applier.strip(relevant.iter().copied(), &mut document);
                (Vec::new(), DecompositionStats::default())
            }
            Err(e) => return Err(e.into()),
        };

        let passthrough: &[StyleItem] = if self.config.keep_passthrough_rules {
            projection.passthrough.as_slice()
        } else {
            &[]
        };

        let report = Report {
            declarations: projection.declarations.len(),
            relevant_elements: relevant.len(),
            rules: rules.len(),
            modified_elements: document.modified(),
            passthrough_items: passthrough.len(),
            stats,
        };

        let output = Output {
            markup: document.to_markup()?,
            css: emit(passthrough, &rules),
            report,
        };
        tracing::info!(target: TARGET, "{}", output.report);
        Ok(output)
    }

    /// Read both inputs, merge them and write both outputs.
    ///
    /// Missing parent directories of the outputs are created.
    pub fn run_files(
        &self,
        html: impl AsRef<Path>,
        css: impl AsRef<Path>,
        out_html: impl AsRef<Path>,
        out_css: impl AsRef<Path>,
    ) -> Result<Report> {
        let markup = read(html.as_ref())?;
        let stylesheet = read(css.as_ref())?;

        let output = self.run(&markup, &stylesheet)?;

        write(out_html.as_ref(), &output.markup)?;
        write(out_css.as_ref(), &output.css)?;
        Ok(output.report)
    }

    /// Fail if a class shaped like a generated rule name (`<prefix><digits>`)
    /// is used outside the namespace.
    fn check_collisions(&self, document: &Document) -> Result<()> {
        let prefix = &self.config.rule_prefix;
        let is_generated = |class: &str| {
            class
                .strip_prefix(prefix.as_str())
                .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
        };

        let clash = document
            .elements()
            .flat_map(|element: ElementHandle| document.classes(element).iter())
            .find(|&class| !self.namespace.contains(class) && is_generated(class));

        match clash {
            Some(class) => Err(Error::NameCollision {
                class: class.to_string(),
                namespace: self.namespace.to_string(),
            }),
            None => Ok(()),
        }
    }
}

impl Default for Optimizer {
    fn default() -> Self {
        let config = Config::default();
        let namespace = config.namespace();
        Self { config, namespace }
    }
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

fn write(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    std::fs::write(path, content).map_err(|e| Error::io(path, e))
}
