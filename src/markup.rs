//! TLatex-style text markup.
//!
//! Report labels are written in the markup of ROOT's `TLatex`, e.g.
//! `#bf{CMS} 904,#scale[0.75]{ #it{Preliminary}}` or `V_{thrs} (mV)`.
//! The supported subset is:
//!
//! | Markup | Effect |
//! |---|---|
//! | `#bf{...}` | bold |
//! | `#it{...}` | italic |
//! | `#scale[f]{...}` | font size times `f` |
//! | `#color[n]{...}` | ROOT palette color `n` (see [`Rgba::from_root_index`]) |
//! | `_{...}` | subscript |
//! | `^{...}` | superscript |
//! | `#approx`, `#times`, `#pm`, `#sigma`, ... | the symbol itself |
//!
//! Groups nest. Anything else, including unknown `#commands`, is kept as literal
//! text; an unclosed group extends to the end of the string. Parsing never fails.

use crate::color::Rgba;
use std::iter::Peekable;
use std::str::Chars;

/// Vertical placement of a run relative to the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shift {
    /// On the baseline.
    #[default]
    Baseline,
    /// Subscript.
    Sub,
    /// Superscript.
    Super,
}

/// A stretch of text sharing one style.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    /// The text.
    pub text: String,
    /// Bold weight.
    pub bold: bool,
    /// Italic style.
    pub italic: bool,
    /// Font size multiplier.
    pub scale: f32,
    /// Baseline shift.
    pub shift: Shift,
    /// Color override; `None` inherits the label color.
    pub color: Option<Rgba>,
}

#[derive(Debug, Clone, Copy)]
struct RunStyle {
    bold: bool,
    italic: bool,
    scale: f32,
    shift: Shift,
    color: Option<Rgba>,
}

impl Default for RunStyle {
    fn default() -> Self {
        Self { bold: false, italic: false, scale: 1.0, shift: Shift::Baseline, color: None }
    }
}

/// Parsed markup: a sequence of styled runs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Markup {
    runs: Vec<TextRun>,
}

impl Markup {
    /// Parse a markup string.
    #[must_use]
    pub fn parse(source: &str) -> Self {
        let mut runs = Vec::new();
        let mut chars = source.chars().peekable();
        parse_group(&mut chars, RunStyle::default(), &mut runs, false);
        Self { runs }
    }

    /// Wrap text verbatim, without interpreting markup.
    #[must_use]
    pub fn literal(text: &str) -> Self {
        let mut runs = Vec::new();
        push_run(&mut runs, text.to_string(), RunStyle::default());
        Self { runs }
    }

    /// The styled runs, in reading order.
    #[must_use]
    pub fn runs(&self) -> &[TextRun] {
        &self.runs
    }

    /// Text content with all markup removed.
    #[must_use]
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    /// True when every run has the default style.
    #[must_use]
    pub fn is_plain(&self) -> bool {
        self.runs.iter().all(|run| {
            !run.bold
                && !run.italic
                && (run.scale - 1.0).abs() < f32::EPSILON
                && run.shift == Shift::Baseline
                && run.color.is_none()
        })
    }
}

fn push_run(runs: &mut Vec<TextRun>, text: String, style: RunStyle) {
    if text.is_empty() {
        return;
    }
    runs.push(TextRun {
        text,
        bold: style.bold,
        italic: style.italic,
        scale: style.scale,
        shift: style.shift,
        color: style.color,
    });
}

/// Character for a `#name` symbol.
fn symbol(name: &str) -> Option<char> {
    let c = match name {
        "approx" => '≈',
        "times" => '×',
        "pm" => '±',
        "circ" => '°',
        "alpha" => 'α',
        "beta" => 'β',
        "gamma" => 'γ',
        "delta" => 'δ',
        "epsilon" => 'ε',
        "lambda" => 'λ',
        "mu" => 'μ',
        "sigma" => 'σ',
        _ => return None,
    };
    Some(c)
}

/// Parse until the closing brace of the current group (or end of input).
fn parse_group(chars: &mut Peekable<Chars<'_>>, style: RunStyle, runs: &mut Vec<TextRun>, nested: bool) {
    let mut buf = String::new();

    while let Some(c) = chars.next() {
        match c {
            '}' if nested => break,
            '#' => {
                let name = take_while(chars, char::is_alphabetic);
                if let Some(c) = symbol(&name) {
                    buf.push(c);
                    continue;
                }
                match open_command(&name, chars, style) {
                    Ok(inner) => {
                        push_run(runs, std::mem::take(&mut buf), style);
                        parse_group(chars, inner, runs, true);
                    }
                    Err(literal) => buf.push_str(&literal),
                }
            }
            '_' | '^' if chars.peek() == Some(&'{') => {
                chars.next();
                push_run(runs, std::mem::take(&mut buf), style);
                let shift = if c == '_' { Shift::Sub } else { Shift::Super };
                parse_group(chars, RunStyle { shift, ..style }, runs, true);
            }
            _ => buf.push(c),
        }
    }

    push_run(runs, buf, style);
}

/// Style for `#name[...]{`, consuming input up to and including the opening brace.
///
/// When the command is unknown or malformed, returns the consumed text so it can
/// be kept literally.
fn open_command(name: &str, chars: &mut Peekable<Chars<'_>>, style: RunStyle) -> Result<RunStyle, String> {
    let mut consumed = format!("#{name}");
    let inner = match name {
        "bf" => Some(RunStyle { bold: true, ..style }),
        "it" => Some(RunStyle { italic: true, ..style }),
        "scale" => bracket_arg(chars, &mut consumed)
            .and_then(|arg| arg.trim().parse::<f32>().ok())
            .filter(|factor| *factor > 0.0)
            .map(|factor| RunStyle { scale: style.scale * factor, ..style }),
        "color" => bracket_arg(chars, &mut consumed)
            .and_then(|arg| arg.trim().parse::<u32>().ok())
            .and_then(Rgba::from_root_index)
            .map(|color| RunStyle { color: Some(color), ..style }),
        _ => None,
    };

    match inner {
        Some(inner) if chars.next_if_eq(&'{').is_some() => Ok(inner),
        _ => Err(consumed),
    }
}

/// The text of a `[...]` argument, appended to `consumed` as it is read.
fn bracket_arg(chars: &mut Peekable<Chars<'_>>, consumed: &mut String) -> Option<String> {
    chars.next_if_eq(&'[')?;
    let arg = take_while(chars, |c| c != ']');
    consumed.push('[');
    consumed.push_str(&arg);
    chars.next_if_eq(&']')?;
    consumed.push(']');
    Some(arg)
}

fn take_while(chars: &mut Peekable<Chars<'_>>, pred: impl Fn(char) -> bool) -> String {
    let mut out = String::new();
    while let Some(&c) = chars.peek() {
        if !pred(c) {
            break;
        }
        out.push(c);
        chars.next();
    }
    out
}
