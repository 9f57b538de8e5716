use anyhow::{Context, bail};
use clap::Args;
use groovyscope_api::{Span, TypeBinding};
use groovyscope_core::GroovyscopeConfig;
use groovyscope_core::util::line_col_to_offset;
use groovyscope_groovy::{CatalogCache, GroovyInferencer, SourceAnalysis};
use schemars::JsonSchema;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct TypeArgs {
    /// Groovy source file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Byte offset of the range
    #[arg(long, requires = "length", conflicts_with_all = ["text", "line"])]
    pub offset: Option<usize>,

    /// Zero-based line of the range start, with --column
    #[arg(long, requires_all = ["column", "length"], conflicts_with = "text")]
    pub line: Option<usize>,

    /// Zero-based UTF-16 column of the range start
    #[arg(long, requires = "line")]
    pub column: Option<usize>,

    /// Length of the range in bytes
    #[arg(long)]
    pub length: Option<usize>,

    /// Query an occurrence of this text; the last one unless --first
    #[arg(long, required_unless_present_any = ["offset", "line"])]
    pub text: Option<String>,

    #[arg(long, requires = "text")]
    pub first: bool,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Output of `groovyscope type --json`.
#[derive(Serialize, JsonSchema)]
pub(crate) struct TypeReport {
    pub file: String,
    pub span: Span,
    /// Source text of the queried range
    pub text: String,
    pub binding: TypeBinding,
    pub parse_errors: Vec<String>,
}

pub fn run(config: &GroovyscopeConfig, args: &TypeArgs) -> anyhow::Result<()> {
    let source = std::fs::read_to_string(&args.file)
        .with_context(|| format!("cannot read {}", args.file.display()))?;

    let cache = CatalogCache::new();
    let inferencer = GroovyInferencer::from_config(config, &cache);
    let analysis = inferencer.analyze(&source);
    let span = query_span(&analysis, args)?;

    let binding = analysis.type_at(span);
    tracing::info!(
        "{}:{}..{} resolved to {}",
        args.file.display(),
        span.start,
        span.end,
        binding
    );

    let report = TypeReport {
        file: args.file.display().to_string(),
        span,
        text: source[span.start..span.end].to_string(),
        binding,
        parse_errors: analysis.parse_errors().iter().map(|e| e.to_string()).collect(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    for error in &report.parse_errors {
        eprintln!("warning: {error}");
    }
    println!("Expression:    {}", report.text);
    println!("Type:          {}", report.binding.type_ref);
    println!("Declaring:     {}", report.binding.declaring_type);
    println!("Resolved by:   {}", report.binding.origin);
    println!("Confidence:    {}", report.binding.confidence);
    Ok(())
}

fn query_span(analysis: &SourceAnalysis, args: &TypeArgs) -> anyhow::Result<Span> {
    if let Some(text) = &args.text {
        return analysis
            .find_text(text, args.first)
            .with_context(|| format!("'{text}' does not occur in {}", args.file.display()));
    }
    let source = analysis.source();
    let start = match (args.offset, args.line, args.column) {
        (Some(offset), _, _) => Some(offset),
        (None, Some(line), Some(column)) => Some(line_col_to_offset(source, line, column)),
        _ => None,
    };
    let (Some(offset), Some(length)) = (start, args.length) else {
        bail!("either --text, --offset or --line and --column, with --length, is required");
    };
    let end = offset.saturating_add(length);
    if end > source.len() || !source.is_char_boundary(offset) || !source.is_char_boundary(end) {
        bail!(
            "range {offset}..{end} is outside {} ({} bytes)",
            args.file.display(),
            source.len()
        );
    }
    Ok(Span::new(offset, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use groovyscope_groovy::CatalogBuilder;
    use std::sync::Arc;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: TypeArgs,
    }

    fn analysis(source: &str) -> SourceAnalysis {
        let catalog = CatalogBuilder::new(Default::default()).build();
        GroovyInferencer::new(Arc::new(catalog)).analyze(source)
    }

    #[test]
    fn test_text_query_uses_last_occurrence() {
        let harness = Harness::parse_from(["t", "a.groovy", "--text", "x"]);
        let span = query_span(&analysis("def x = 1\nx\n"), &harness.args).unwrap();
        assert_eq!(span, Span::new(10, 11));

        let harness = Harness::parse_from(["t", "a.groovy", "--text", "x", "--first"]);
        let span = query_span(&analysis("def x = 1\nx\n"), &harness.args).unwrap();
        assert_eq!(span, Span::new(4, 5));
    }

    #[test]
    fn test_offset_range_is_checked() {
        let harness = Harness::parse_from(["t", "a.groovy", "--offset", "4", "--length", "1"]);
        assert_eq!(
            query_span(&analysis("def x = 1\n"), &harness.args).unwrap(),
            Span::new(4, 5)
        );

        let harness = Harness::parse_from(["t", "a.groovy", "--offset", "40", "--length", "1"]);
        assert!(query_span(&analysis("def x = 1\n"), &harness.args).is_err());
    }

    #[test]
    fn test_line_and_column_locate_the_range() {
        let harness = Harness::parse_from([
            "t", "a.groovy", "--line", "1", "--column", "0", "--length", "1",
        ]);
        assert_eq!(
            query_span(&analysis("def x = 1\nx\n"), &harness.args).unwrap(),
            Span::new(10, 11)
        );
    }

    #[test]
    fn test_range_and_text_conflict() {
        assert!(
            Harness::try_parse_from(["t", "a.groovy", "--offset", "1", "--length", "1", "--text", "x"])
                .is_err()
        );
        assert!(Harness::try_parse_from(["t", "a.groovy", "--offset", "1"]).is_err());
    }
}
