//! Reader for OWNERS files.
//!
//! Each non-blank line is one directive:
//!
//! ```text
//! # comment
//! alice@example.com                  owner of the whole directory
//! *                                  anyone may approve
//! set noparent                       ignore OWNERS files further up
//! per-file *.cc,*.h=bob@example.com  owner of matching files only
//! per-file BUILD=set noparent
//! per-file *.mojom=file://ipc/SECURITY_OWNERS
//! file://tools/OWNERS                import owners of another file
//! ```

use crate::error::OwnersFileError;
use crate::identity::Identity;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{char, space0, space1},
    combinator::{all_consuming, map, recognize, value},
    multi::separated_list1,
    sequence::{delimited, preceded},
};

/// What a `per-file` directive grants to matching files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Grant {
    /// Ownership for an identity (possibly the wildcard).
    Owner(Identity),
    /// Ignore owners further up for matching files.
    NoParent,
    /// Ownership for the directory-wide owners of another OWNERS file.
    Include(String),
}

/// A single OWNERS file directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Directory-wide owner (possibly the wildcard).
    Owner(Identity),
    /// `set noparent`.
    NoParent,
    /// `per-file <globs>=<grants>`.
    PerFile {
        /// File name globs, relative to the OWNERS directory.
        globs: Vec<String>,
        /// What matching files get.
        grants: Vec<Grant>,
    },
    /// `file:<path>` include.
    Include(String),
}

/// The directives of one OWNERS file, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnersFile {
    pub directives: Vec<Directive>,
}

fn is_email_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '+' | '%' | '.')
}

fn is_glob_char(c: char) -> bool {
    !c.is_whitespace() && c != ',' && c != '='
}

fn email(input: &str) -> IResult<&str, &str> {
    recognize((
        take_while1(is_email_char),
        char('@'),
        take_while1(is_email_char),
    ))
    .parse(input)
}

fn no_parent(input: &str) -> IResult<&str, ()> {
    value((), (tag("set"), space1, tag("noparent"))).parse(input)
}

fn list_separator(input: &str) -> IResult<&str, char> {
    delimited(space0, char(','), space0).parse(input)
}

fn include_target(input: &str) -> IResult<&str, &str> {
    preceded(
        (tag("file:"), space0),
        take_while1(|c: char| !c.is_whitespace() && c != ','),
    )
    .parse(input)
}

fn grant(input: &str) -> IResult<&str, Grant> {
    alt((
        value(Grant::NoParent, no_parent),
        map(include_target, |path: &str| Grant::Include(path.to_string())),
        value(Grant::Owner(Identity::everyone()), char('*')),
        map(email, |e: &str| Grant::Owner(Identity::from(e))),
    ))
    .parse(input)
}

fn per_file(input: &str) -> IResult<&str, Directive> {
    let (input, _) = (tag("per-file"), space1).parse(input)?;
    let (input, globs) = separated_list1(list_separator, take_while1(is_glob_char)).parse(input)?;
    let (input, _) = (space0, char('='), space0).parse(input)?;
    let (input, grants) = separated_list1(list_separator, grant).parse(input)?;
    Ok((
        input,
        Directive::PerFile {
            globs: globs.into_iter().map(str::to_string).collect(),
            grants,
        },
    ))
}

fn include(input: &str) -> IResult<&str, Directive> {
    map(include_target, |path: &str| Directive::Include(path.to_string())).parse(input)
}

fn directive(input: &str) -> IResult<&str, Directive> {
    alt((
        value(Directive::NoParent, no_parent),
        include,
        per_file,
        value(Directive::Owner(Identity::everyone()), char('*')),
        map(email, |e: &str| Directive::Owner(Identity::from(e))),
    ))
    .parse(input)
}

/// Strips a trailing comment and surrounding whitespace.
fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(start) => &line[..start],
        None => line,
    }
    .trim()
}

fn describe(text: &str) -> &'static str {
    if text.starts_with("per-file") {
        "invalid per-file directive"
    } else if text.starts_with("file:") {
        "invalid include"
    } else if text.starts_with("set ") {
        "unknown setting"
    } else {
        "expected an email address, '*' or a directive"
    }
}

/// Parses the content of an OWNERS file.
///
/// Stops at the first line that is not a valid directive.
pub fn parse_owners_file(input: &str) -> Result<OwnersFile, OwnersFileError> {
    let mut directives = Vec::new();

    for (line_idx, raw) in input.lines().enumerate() {
        let text = strip_comment(raw);
        if text.is_empty() {
            continue;
        }
        match all_consuming(directive).parse(text) {
            Ok((_, parsed)) => directives.push(parsed),
            Err(_) => {
                return Err(OwnersFileError::new(line_idx + 1, text, describe(text)));
            }
        }
    }

    Ok(OwnersFile { directives })
}
