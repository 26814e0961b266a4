//! Math input through an external editor
//!
//! The user writes LaTeX in a temporary `.tex` file. Unrendered input is
//! pasted into the drawing as a plain text object; pre-rendered input is
//! wrapped in a standalone document and written under the latex directory
//! for compilation outside the interceptor.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::mode::ModeSlot;
use crate::target::{Backends, TargetError};

const PREAMBLE: &str = r"\documentclass[12pt,border=12pt]{standalone}

\usepackage[utf8]{inputenc}
\usepackage[T1]{fontenc}
\usepackage{textcomp}
\usepackage{amsmath, amssymb}
\newcommand{\R}{\mathbb R}
\usepackage{cmbright}

\begin{document}
";

#[derive(Debug, thiserror::Error)]
pub enum MathError {
    #[error(transparent)]
    Target(#[from] TargetError),

    #[error("math file: {0}")]
    Io(#[from] std::io::Error),
}

/// What the math flow did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MathOutcome {
    /// The editor was closed without any content
    Empty,
    /// A text object was pasted into the target
    Pasted,
    /// A full LaTeX document was written to this path
    Written(PathBuf),
}

/// Wrap a math fragment in the fixed standalone document
pub fn latex_document(body: &str) -> String {
    format!("{}{}\n\\end{{document}}\n", PREAMBLE, body.trim_end())
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// SVG snippet holding `text` as a text object, one line per `tspan`
pub fn text_object_svg(text: &str, font: &str, font_size: u32) -> String {
    let lines: String = text
        .trim_end()
        .lines()
        .map(|line| {
            format!(
                r#"<tspan x="0" dy="1.25em" sodipodi:role="line">{}</tspan>"#,
                escape_xml(line)
            )
        })
        .collect();

    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#,
            "\n",
            r#"<svg xmlns="http://www.w3.org/2000/svg" "#,
            r#"xmlns:sodipodi="http://sodipodi.sourceforge.net/DTD/sodipodi-0.dtd">"#,
            "\n",
            r#"<text xml:space="preserve" style="font-size:{size}px;font-family:'{font}';fill:#000000">"#,
            "{lines}</text></svg>"
        ),
        size = font_size,
        font = escape_xml(font),
        lines = lines,
    )
}

/// Next free `<n>.tex` in `dir`, counting from 1
fn next_document_path(dir: &Path) -> PathBuf {
    let highest = fs::read_dir(dir)
        .into_iter()
        .flatten()
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let path = entry.path();
            if path.extension()? != "tex" {
                return None;
            }
            path.file_stem()?.to_str()?.parse::<u64>().ok()
        })
        .max()
        .unwrap_or(0);

    dir.join(format!("{}.tex", highest + 1))
}

/// Open the editor on a fresh temporary file and act on what was written
///
/// Blocks until the editor exits.
pub fn run_math_input(
    prerendered: bool,
    backends: &mut Backends,
    settings: &Settings,
    latex_dir: &Path,
) -> Result<MathOutcome, MathError> {
    let scratch = tempfile::Builder::new()
        .prefix("inkchord-")
        .suffix(".tex")
        .tempfile()?;

    backends.editor.open_editor(scratch.path())?;

    // Editors may replace the file instead of writing through our handle
    let content = fs::read_to_string(scratch.path())?;
    if content.trim().is_empty() {
        tracing::debug!("math editor closed without content");
        return Ok(MathOutcome::Empty);
    }

    if prerendered {
        fs::create_dir_all(latex_dir)?;
        let path = next_document_path(latex_dir);
        fs::write(&path, latex_document(&content))?;
        tracing::info!("Wrote LaTeX document to {}", path.display());
        return Ok(MathOutcome::Written(path));
    }

    let svg = text_object_svg(&content, &settings.font, settings.font_size);
    backends.clipboard.copy(&svg, &settings.clipboard_target)?;
    backends.target.press(ModeSlot::Object.paste_key())?;
    Ok(MathOutcome::Pasted)
}
