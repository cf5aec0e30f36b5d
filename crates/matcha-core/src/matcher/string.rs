use regex::Regex;
use std::sync::LazyLock;

use super::{rule_expect, Matcher, Verdict};
use crate::errors::{MatchaError, Result};
use crate::log_op_error;
use crate::schema::Op;
use crate::value::Value;

/// Strings and references to strings; anything else has no text.
fn text_of(actual: &Value) -> Option<&str> {
    match actual {
        Value::Str(s) => Some(s),
        Value::Ref(inner) => inner.as_str(),
        _ => None,
    }
}

/// Matches string content against a compiled pattern.
#[derive(Debug, Clone)]
pub struct RegExp {
    regex: Regex,
}

/// Compile `pattern` into a matcher.
///
/// # Errors
///
/// - `InvalidPattern`: the pattern does not compile
pub fn reg_exp(pattern: &str) -> Result<RegExp> {
    match Regex::new(pattern) {
        Ok(regex) => Ok(RegExp { regex }),
        Err(source) => {
            let err = MatchaError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            };
            log_op_error!(Op::CompilePattern.as_str(), err, duration_ms = 0);
            Err(err)
        }
    }
}

impl RegExp {
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl Matcher for RegExp {
    fn evaluate(&self, actual: &Value) -> Verdict {
        Verdict::from_bool(text_of(actual).is_some_and(|text| self.regex.is_match(text)))
    }

    fn describe(&self) -> String {
        format!("match /{}/", self.regex.as_str())
    }
}

/// Matches strings that parse as a mail address.
#[derive(Debug, Clone, Copy, Default)]
pub struct Email;

pub fn email() -> Email {
    Email
}

impl Matcher for Email {
    fn evaluate(&self, actual: &Value) -> Verdict {
        Verdict::from_bool(text_of(actual).is_some_and(|text| parse_mailbox(text).is_ok()))
    }

    fn describe(&self) -> String {
        "mail address".to_string()
    }
}

rule_expect!(RegExp, Email);

/// A parsed mail address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mailbox {
    /// Display name, when given as `Name <local@domain>`
    pub name: Option<String>,
    /// `local@domain`
    pub address: String,
}

static DOT_ATOM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*$")
        .expect("dot-atom pattern compiles")
});

static QUOTED_STRING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^"(?:[^"\\\r\n]|\\.)*"$"#).expect("quoted-string pattern compiles")
});

static DOMAIN_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[[^\[\]\\\s]*\]$").expect("domain-literal pattern compiles")
});

static PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^[^()<>\[\]:;@\\,"\p{Cc}]+$"#).expect("phrase pattern compiles")
});

/// Parse `local@domain` or `Display Name <local@domain>`.
///
/// # Errors
///
/// - `InvalidAddress`: the input is empty, lacks an `@`, has unbalanced angle
///   brackets, or contains an invalid local part, domain or display name
pub fn parse_address(input: &str) -> Result<Mailbox> {
    parse_mailbox(input).inspect_err(|err| {
        log_op_error!(Op::ParseAddress.as_str(), err, duration_ms = 0);
    })
}

fn parse_mailbox(input: &str) -> Result<Mailbox> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(MatchaError::invalid_address(input, "empty input"));
    }

    if let Some(rest) = trimmed.strip_suffix('>') {
        let open = rest
            .rfind('<')
            .ok_or_else(|| MatchaError::invalid_address(input, "unbalanced angle brackets"))?;
        let name = parse_display_name(rest[..open].trim(), input)?;
        let address = parse_addr_spec(&rest[open + 1..], input)?;
        return Ok(Mailbox { name, address });
    }

    if trimmed.contains('<') {
        return Err(MatchaError::invalid_address(input, "unbalanced angle brackets"));
    }

    Ok(Mailbox {
        name: None,
        address: parse_addr_spec(trimmed, input)?,
    })
}

fn parse_addr_spec(spec: &str, input: &str) -> Result<String> {
    let at = spec
        .rfind('@')
        .ok_or_else(|| MatchaError::invalid_address(input, "missing @"))?;
    let (local, domain) = (&spec[..at], &spec[at + 1..]);

    if local.is_empty() {
        return Err(MatchaError::invalid_address(input, "empty local part"));
    }
    if !DOT_ATOM.is_match(local) && !QUOTED_STRING.is_match(local) {
        return Err(MatchaError::invalid_address(input, "invalid local part"));
    }
    if domain.is_empty() {
        return Err(MatchaError::invalid_address(input, "empty domain"));
    }
    if !DOT_ATOM.is_match(domain) && !DOMAIN_LITERAL.is_match(domain) {
        return Err(MatchaError::invalid_address(input, "invalid domain"));
    }

    Ok(format!("{local}@{domain}"))
}

fn parse_display_name(display: &str, input: &str) -> Result<Option<String>> {
    if display.is_empty() {
        return Ok(None);
    }
    if display.starts_with('"') {
        if !QUOTED_STRING.is_match(display) {
            return Err(MatchaError::invalid_address(input, "invalid quoted display name"));
        }
        let inner = &display[1..display.len() - 1];
        let mut name = String::with_capacity(inner.len());
        let mut chars = inner.chars();
        while let Some(c) = chars.next() {
            match c {
                '\\' => name.extend(chars.next()),
                c => name.push(c),
            }
        }
        return Ok(Some(name));
    }
    if !PHRASE.is_match(display) {
        return Err(MatchaError::invalid_address(input, "invalid display name"));
    }
    Ok(Some(display.to_string()))
}
