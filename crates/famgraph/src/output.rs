//! Family listings.

use crate::error::{Error, Result};
use crate::family::{Family, Member};
use serde::Serialize;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// `<head> <count>`, then `\t<member>[\t<label>]` per member.
    #[default]
    Indented,
    /// Like `Indented` but without labels.
    Names,
    /// One family per line: `<head>\t<member>\t<member>...`.
    Line,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "indented" => Ok(Self::Indented),
            "names" => Ok(Self::Names),
            "line" => Ok(Self::Line),
            "json" => Ok(Self::Json),
            _ => Err(()),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Indented => "indented",
            Self::Names => "names",
            Self::Line => "line",
            Self::Json => "json",
        })
    }
}

#[derive(Serialize)]
struct FamilyOut<'a> {
    head: &'a str,
    degree: usize,
    members: &'a [Member],
}

/// Writes `families` in extraction order. `pretty` only affects [`OutputFormat::Json`].
pub fn write_families<'a, W, I>(
    mut out: W,
    families: I,
    format: OutputFormat,
    pretty: bool,
) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Family>,
{
    if format == OutputFormat::Json {
        let rows: Vec<FamilyOut<'_>> = families
            .into_iter()
            .map(|f| FamilyOut {
                head: f.head(),
                degree: f.degree(),
                members: f.members(),
            })
            .collect();
        if pretty {
            serde_json::to_writer_pretty(&mut out, &rows)?;
        } else {
            serde_json::to_writer(&mut out, &rows)?;
        }
        writeln!(out)?;
        return Ok(());
    }

    for family in families {
        write_family(&mut out, family, format)?;
    }
    Ok(())
}

fn write_family<W: Write>(out: &mut W, family: &Family, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Indented | OutputFormat::Names => {
            writeln!(out, "{} {}", family.head(), family.degree())?;
            for m in family.members() {
                match (&m.label, format) {
                    (Some(label), OutputFormat::Indented) => {
                        writeln!(out, "\t{}\t{label}", m.name)?
                    }
                    _ => writeln!(out, "\t{}", m.name)?,
                }
            }
        }
        OutputFormat::Line => {
            out.write_all(family.head().as_bytes())?;
            for name in family.member_names() {
                write!(out, "\t{name}")?;
            }
            writeln!(out)?;
        }
        OutputFormat::Json => unreachable!("json is written as a single document"),
    }
    Ok(())
}

/// Parses a listing produced with [`OutputFormat::Indented`].
pub fn parse_indented(text: &str) -> Result<Vec<Family>> {
    struct Open {
        head: String,
        expected: usize,
        line_no: usize,
        members: Vec<Member>,
    }

    fn close(open: Open) -> Result<Family> {
        if open.members.len() != open.expected {
            return Err(Error::MalformedFamily {
                line_no: open.line_no,
                message: format!(
                    "`{}` declares {} members but lists {}",
                    open.head,
                    open.expected,
                    open.members.len()
                ),
            });
        }
        Ok(Family::new(open.head, open.members))
    }

    let mut families = Vec::new();
    let mut open: Option<Open> = None;

    for (i, line) in text.lines().enumerate() {
        let line_no = i + 1;
        if let Some(rest) = line.strip_prefix('\t') {
            let Some(current) = open.as_mut() else {
                return Err(Error::MalformedFamily {
                    line_no,
                    message: "member listed before any head".to_string(),
                });
            };
            let member = match rest.split_once('\t') {
                Some((name, label)) => Member::new(name, Some(label)),
                None => Member::unlabeled(rest),
            };
            current.members.push(member);
            continue;
        }

        let Some((head, count)) = line.rsplit_once(' ') else {
            return Err(Error::MalformedFamily {
                line_no,
                message: format!("expected `<head> <count>`, got '{line}'"),
            });
        };
        let Ok(expected) = count.parse::<usize>() else {
            return Err(Error::MalformedFamily {
                line_no,
                message: format!("member count '{count}' is not a number"),
            });
        };
        if let Some(prev) = open.take() {
            families.push(close(prev)?);
        }
        open = Some(Open {
            head: head.to_string(),
            expected,
            line_no,
            members: Vec::with_capacity(expected),
        });
    }

    if let Some(prev) = open {
        families.push(close(prev)?);
    }
    Ok(families)
}
