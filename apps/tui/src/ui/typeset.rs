//! Terminal typesetting for the `$...$` math notation that summaries and
//! challenges may embed. A segment that cannot be typeset is logged and
//! kept verbatim; callers never see an error.

use std::iter::Peekable;
use std::str::Chars;

use thiserror::Error;

use crate::config::debug_enabled;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypesetError {
    #[error("unterminated math segment")]
    Unterminated,
    #[error("unbalanced braces in math segment")]
    UnbalancedBraces,
    #[error("unknown command: \\{0}")]
    UnknownCommand(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Script {
    Super,
    Sub,
}

/// Typesets every math segment in `text`, leaving the prose around them
/// untouched.
pub fn typeset(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find('$') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        let Some(end) = after.find('$') else {
            log_typeset_error(&TypesetError::Unterminated, after);
            out.push_str(&rest[start..]);
            return out;
        };

        let segment = &after[..end];
        match render_math(segment) {
            Ok(rendered) => out.push_str(&rendered),
            Err(error) => {
                log_typeset_error(&error, segment);
                out.push('$');
                out.push_str(segment);
                out.push('$');
            }
        }
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    out
}

/// Typesets `text` and splits it into display lines at the newlines the
/// source carried.
pub fn typeset_lines(text: &str) -> Vec<String> {
    typeset(text).split('\n').map(str::to_string).collect()
}

fn log_typeset_error(error: &TypesetError, segment: &str) {
    if debug_enabled() {
        eprintln!("[DEBUG] typeset error: {error} in {segment:?}");
    }
}

fn render_math(segment: &str) -> Result<String, TypesetError> {
    let depth = segment.chars().try_fold(0_i32, |depth, ch| match ch {
        '{' => Ok(depth + 1),
        '}' if depth == 0 => Err(TypesetError::UnbalancedBraces),
        '}' => Ok(depth - 1),
        _ => Ok(depth),
    })?;
    if depth != 0 {
        return Err(TypesetError::UnbalancedBraces);
    }

    let mut out = String::with_capacity(segment.len());
    let mut chars = segment.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\\' => render_command(&mut chars, &mut out)?,
            '^' => {
                let body = take_group(&mut chars)?;
                out.push_str(&render_script(&render_math(&body)?, Script::Super));
            }
            '_' => {
                let body = take_group(&mut chars)?;
                out.push_str(&render_script(&render_math(&body)?, Script::Sub));
            }
            '{' | '}' => {}
            other => out.push(other),
        }
    }

    Ok(out)
}

fn render_command(chars: &mut Peekable<Chars<'_>>, out: &mut String) -> Result<(), TypesetError> {
    let mut name = String::new();
    while let Some(&next) = chars.peek() {
        if next.is_ascii_alphabetic() {
            name.push(next);
            chars.next();
        } else {
            break;
        }
    }

    if name.is_empty() {
        // An escaped single character such as \{ or \%.
        if let Some(escaped) = chars.next() {
            out.push(escaped);
        }
        return Ok(());
    }

    match name.as_str() {
        "frac" => {
            let numerator = render_math(&take_group(chars)?)?;
            let denominator = render_math(&take_group(chars)?)?;
            out.push_str(&numerator);
            out.push('/');
            out.push_str(&denominator);
        }
        "sqrt" => {
            let radicand = render_math(&take_group(chars)?)?;
            out.push('√');
            out.push('(');
            out.push_str(&radicand);
            out.push(')');
        }
        other => match symbol(other) {
            Some(replacement) => out.push_str(replacement),
            None => return Err(TypesetError::UnknownCommand(other.to_string())),
        },
    }

    Ok(())
}

/// Takes the next argument: a braced group, or a single character.
fn take_group(chars: &mut Peekable<Chars<'_>>) -> Result<String, TypesetError> {
    match chars.peek() {
        Some('{') => {
            chars.next();
            let mut depth = 1;
            let mut group = String::new();
            for ch in chars.by_ref() {
                match ch {
                    '{' => {
                        depth += 1;
                        group.push(ch);
                    }
                    '}' => {
                        depth -= 1;
                        if depth == 0 {
                            return Ok(group);
                        }
                        group.push(ch);
                    }
                    _ => group.push(ch),
                }
            }
            Err(TypesetError::UnbalancedBraces)
        }
        Some(_) => Ok(chars.next().map(String::from).unwrap_or_default()),
        None => Err(TypesetError::UnbalancedBraces),
    }
}

fn render_script(body: &str, kind: Script) -> String {
    let mapped: Option<String> = body.chars().map(|ch| script_char(ch, kind)).collect();
    mapped.unwrap_or_else(|| {
        let marker = match kind {
            Script::Super => '^',
            Script::Sub => '_',
        };
        if body.chars().count() == 1 {
            format!("{marker}{body}")
        } else {
            format!("{marker}({body})")
        }
    })
}

const fn script_char(ch: char, kind: Script) -> Option<char> {
    match kind {
        Script::Super => match ch {
            '0' => Some('⁰'),
            '1' => Some('¹'),
            '2' => Some('²'),
            '3' => Some('³'),
            '4' => Some('⁴'),
            '5' => Some('⁵'),
            '6' => Some('⁶'),
            '7' => Some('⁷'),
            '8' => Some('⁸'),
            '9' => Some('⁹'),
            '+' => Some('⁺'),
            '-' => Some('⁻'),
            'n' => Some('ⁿ'),
            'i' => Some('ⁱ'),
            _ => None,
        },
        Script::Sub => match ch {
            '0' => Some('₀'),
            '1' => Some('₁'),
            '2' => Some('₂'),
            '3' => Some('₃'),
            '4' => Some('₄'),
            '5' => Some('₅'),
            '6' => Some('₆'),
            '7' => Some('₇'),
            '8' => Some('₈'),
            '9' => Some('₉'),
            '+' => Some('₊'),
            '-' => Some('₋'),
            _ => None,
        },
    }
}

fn symbol(name: &str) -> Option<&'static str> {
    let replacement = match name {
        "alpha" => "α",
        "beta" => "β",
        "lambda" => "λ",
        "mu" => "μ",
        "pi" => "π",
        "phi" => "φ",
        "sigma" => "σ",
        "theta" => "θ",
        "Delta" => "Δ",
        "Sigma" | "sum" => "Σ",
        "cdot" => "·",
        "times" => "×",
        "div" => "÷",
        "pm" => "±",
        "le" | "leq" => "≤",
        "ge" | "geq" => "≥",
        "ne" | "neq" => "≠",
        "approx" => "≈",
        "infty" => "∞",
        "int" => "∫",
        "to" | "rightarrow" => "→",
        "dots" | "ldots" | "cdots" => "…",
        _ => return None,
    };
    Some(replacement)
}

#[cfg(test)]
mod tests {
    use super::{render_math, typeset, typeset_lines, TypesetError};

    #[test]
    fn prose_passes_through_untouched() {
        assert_eq!(typeset("no math here"), "no math here");
    }

    #[test]
    fn superscripts_become_unicode() {
        assert_eq!(typeset("$x^2$"), "x²");
        assert_eq!(typeset("$a^{10}$"), "a¹⁰");
    }

    #[test]
    fn subscripts_become_unicode() {
        assert_eq!(typeset("$x_1$"), "x₁");
    }

    #[test]
    fn unmappable_scripts_fall_back_to_markers() {
        assert_eq!(typeset("$x^k$"), "x^k");
        assert_eq!(typeset("$x^{k+j}$"), "x^(k+j)");
    }

    #[test]
    fn fractions_and_roots_flatten() {
        assert_eq!(typeset("$\\frac{1}{2}$"), "1/2");
        assert_eq!(typeset("$\\sqrt{2}$"), "√(2)");
    }

    #[test]
    fn symbols_map_to_unicode() {
        assert_eq!(typeset("area $\\pi r^2$"), "area π r²");
        assert_eq!(typeset("$7^2 \\cdot 11$"), "7² · 11");
    }

    #[test]
    fn unknown_commands_keep_the_segment_verbatim() {
        assert_eq!(typeset("see $\\unknowncmd$ here"), "see $\\unknowncmd$ here");
    }

    #[test]
    fn an_unterminated_segment_is_kept_verbatim() {
        assert_eq!(typeset("price is $5 even"), "price is $5 even");
    }

    #[test]
    fn unbalanced_braces_are_an_error() {
        assert_eq!(
            render_math("\\frac{1}{2"),
            Err(TypesetError::UnbalancedBraces)
        );
    }

    #[test]
    fn later_segments_survive_an_earlier_failure() {
        assert_eq!(typeset("$\\nope$ then $x^2$"), "$\\nope$ then x²");
    }

    #[test]
    fn newlines_split_into_display_lines() {
        assert_eq!(typeset_lines("first\nsecond $x^2$"), vec![
            "first".to_string(),
            "second x²".to_string(),
        ]);
    }
}
