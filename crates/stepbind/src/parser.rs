//! Conversion of parsed Gherkin into the resolver's feature model.
//!
//! Backgrounds are folded into every scenario, rules are flattened into the
//! feature, and each `Examples` row of an outline is materialised into a
//! concrete scenario by substituting its `<column>` placeholders.

use crate::model::{Feature, Scenario, ScenarioOutline};
use gherkin::GherkinEnv;
use regex::{Captures, Regex};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<([^>\s][^>]*)>").unwrap_or_else(|_| unreachable!("placeholder regex is valid"))
});

/// Errors raised while turning Gherkin text into a [`Feature`].
#[derive(Debug, Error)]
pub enum ParseError {
    /// The Gherkin parser rejected the text.
    #[error("failed to parse feature: {0}")]
    Gherkin(#[from] gherkin::ParseError),
    /// A feature file could not be read.
    #[error("failed to read feature file {}: {source}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// An examples row has a different number of cells than its header.
    #[error(
        "examples row {row} of scenario \"{scenario}\" has {actual} cells but the header has \
         {expected}"
    )]
    ExamplesRowWidth {
        /// Title of the outline.
        scenario: String,
        /// One-based row number within its table, header excluded.
        row: usize,
        /// Number of header cells.
        expected: usize,
        /// Number of cells in the offending row.
        actual: usize,
    },
}

/// Parse Gherkin source text into a [`Feature`].
///
/// # Errors
/// Returns [`ParseError`] when the text is not valid Gherkin or an examples
/// table is malformed.
///
/// # Examples
///
/// ```
/// use stepbind::parse_feature_str;
///
/// let feature = parse_feature_str(
///     "Feature: Accounts\n\
///      \n\
///      Scenario Outline: Deposit\n\
///        When I deposit <amount>\n\
///      \n\
///        Examples:\n\
///          | amount |\n\
///          | 5      |\n\
///          | 10     |\n",
/// )
/// .unwrap();
/// let outline = &feature.scenario_outlines[0];
/// assert_eq!(outline.scenarios[1].title, "Deposit (example 2)");
/// assert_eq!(outline.scenarios[1].steps[0].text.as_str(), "I deposit 10");
/// ```
pub fn parse_feature_str(text: &str) -> Result<Feature, ParseError> {
    let mut source = text.to_owned();
    normalise_trailing_newline(&mut source);
    let parsed = gherkin::Feature::parse(source.as_str(), GherkinEnv::default())?;
    Feature::from_gherkin(&parsed)
}

/// Read and parse a `.feature` file.
///
/// # Errors
/// Returns [`ParseError::Io`] when the file cannot be read, otherwise the
/// errors of [`parse_feature_str`].
pub fn parse_feature_file(path: impl AsRef<Path>) -> Result<Feature, ParseError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("parsing feature file {}", path.display());
    parse_feature_str(&text)
}

fn normalise_trailing_newline(text: &mut String) {
    if !text.ends_with('\n') {
        text.push('\n');
    }
}

impl Feature {
    /// Build the resolver model from a parsed Gherkin feature.
    ///
    /// # Errors
    /// Returns [`ParseError::ExamplesRowWidth`] when an examples row does not
    /// match its header.
    pub fn from_gherkin(parsed: &gherkin::Feature) -> Result<Self, ParseError> {
        let mut feature = Self::new(parsed.name.trim());
        let feature_background = background_steps(parsed.background.as_ref());

        for scenario in &parsed.scenarios {
            add_scenario(&mut feature, &feature_background, scenario)?;
        }
        for rule in &parsed.rules {
            let mut background = feature_background.clone();
            background.extend(background_steps(rule.background.as_ref()));
            for scenario in &rule.scenarios {
                add_scenario(&mut feature, &background, scenario)?;
            }
        }
        Ok(feature)
    }
}

fn background_steps(background: Option<&gherkin::Background>) -> Vec<&str> {
    background
        .map(|bg| bg.steps.iter().map(|step| step.value.as_str()).collect())
        .unwrap_or_default()
}

fn add_scenario(
    feature: &mut Feature,
    background: &[&str],
    scenario: &gherkin::Scenario,
) -> Result<(), ParseError> {
    let title = scenario.name.trim();
    if scenario.examples.is_empty() {
        let mut plain = Scenario::new(title);
        for text in background
            .iter()
            .copied()
            .chain(scenario.steps.iter().map(|step| step.value.as_str()))
        {
            plain.push_step(text);
        }
        feature.scenarios.push(plain);
        return Ok(());
    }

    let mut outline = ScenarioOutline::new(title);
    for (headers, row) in example_rows(title, &scenario.examples)? {
        let mut generated = Scenario::new(format!(
            "{title} (example {})",
            outline.scenarios.len() + 1
        ));
        for text in background {
            generated.push_step(*text);
        }
        for step in &scenario.steps {
            generated.push_step(substitute_placeholders(&step.value, headers, row));
        }
        outline.scenarios.push(generated);
    }
    if outline.scenarios.is_empty() {
        log::warn!("scenario outline \"{title}\" has no example rows; its steps are not checked");
    }
    feature.scenario_outlines.push(outline);
    Ok(())
}

type ExampleRow<'a> = (&'a [String], &'a [String]);

fn example_rows<'a>(
    title: &str,
    examples: &'a [gherkin::Examples],
) -> Result<Vec<ExampleRow<'a>>, ParseError> {
    let mut rows = Vec::new();
    for table in examples.iter().filter_map(|ex| ex.table.as_ref()) {
        let Some((headers, data)) = table.rows.split_first() else {
            continue;
        };
        for (offset, row) in data.iter().enumerate() {
            if row.len() != headers.len() {
                return Err(ParseError::ExamplesRowWidth {
                    scenario: title.to_owned(),
                    row: offset + 1,
                    expected: headers.len(),
                    actual: row.len(),
                });
            }
            rows.push((headers.as_slice(), row.as_slice()));
        }
    }
    Ok(rows)
}

/// Replace `<column>` tokens with the row's values. Unknown names are kept
/// verbatim.
fn substitute_placeholders(text: &str, headers: &[String], row: &[String]) -> String {
    PLACEHOLDER_RE
        .replace_all(text, |caps: &Captures<'_>| {
            let name = caps.get(1).map_or("", |m| m.as_str());
            headers
                .iter()
                .position(|header| header == name)
                .and_then(|idx| row.get(idx))
                .map_or_else(
                    || caps.get(0).map_or("", |m| m.as_str()).to_owned(),
                    Clone::clone,
                )
        })
        .into_owned()
}

#[cfg(test)]
mod tests;
