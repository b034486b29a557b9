//! Argument parsing for single function-call strings such as
//! `coord:current(-3)` or `elext:dataIn('logs', 'region=us')`.
//!
//! This is not an expression parser: it reads exactly one call with literal
//! integer or quoted-string arguments and nothing else.

use crate::error::{OffsetError, Result};

/// One literal argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    Int(i64),
    Text(String),
}

/// A parsed `name(arg, ...)` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub name: String,
    pub args: Vec<Arg>,
}

impl Call {
    /// The call name without a namespace prefix (`elext:today` → `today`).
    pub fn local_name(&self) -> &str {
        self.name
            .rsplit_once(':')
            .map_or(self.name.as_str(), |(_, local)| local)
    }

    /// All arguments as integers.
    ///
    /// # Errors
    ///
    /// Returns [`OffsetError::InvalidArgument`] if any argument is a string.
    pub fn int_args(&self) -> Result<Vec<i64>> {
        self.args
            .iter()
            .map(|arg| match arg {
                Arg::Int(n) => Ok(*n),
                Arg::Text(s) => Err(OffsetError::InvalidArgument(format!(
                    "expected integer argument to {}, got '{s}'",
                    self.name
                ))),
            })
            .collect()
    }
}

/// Parse `name(arg, ...)`.
///
/// # Errors
///
/// Returns [`OffsetError::InvalidArgument`] for a missing name, unbalanced
/// parentheses, an unterminated string or a non-integer bare argument.
pub fn parse_call(text: &str) -> Result<Call> {
    let text = text.trim();
    let invalid = |why: &str| OffsetError::InvalidArgument(format!("{why}: '{text}'"));

    let open = text.find('(').ok_or_else(|| invalid("missing '('"))?;
    let inner = text[open + 1..]
        .strip_suffix(')')
        .ok_or_else(|| invalid("missing closing ')'"))?;
    let name = text[..open].trim();
    if name.is_empty() {
        return Err(invalid("missing function name"));
    }

    let mut args = Vec::new();
    let mut chars = inner.chars().peekable();
    let mut after_comma = false;
    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        let Some(&first) = chars.peek() else {
            if after_comma {
                return Err(invalid("trailing ','"));
            }
            break;
        };

        if first == '\'' || first == '"' {
            chars.next();
            let mut value = String::new();
            loop {
                match chars.next() {
                    Some(c) if c == first => break,
                    Some(c) => value.push(c),
                    None => return Err(invalid("unterminated string argument")),
                }
            }
            args.push(Arg::Text(value));
        } else {
            let mut token = String::new();
            while let Some(c) = chars.next_if(|&c| c != ',') {
                token.push(c);
            }
            let token = token.trim();
            let n = token
                .parse::<i64>()
                .map_err(|_| invalid(&format!("invalid integer argument '{token}'")))?;
            args.push(Arg::Int(n));
        }

        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        match chars.next() {
            None => break,
            Some(',') => after_comma = true,
            Some(c) => return Err(invalid(&format!("unexpected '{c}'"))),
        }
    }

    Ok(Call {
        name: name.to_string(),
        args,
    })
}

/// Recover `n` from a one-argument call such as `coord:current(n)`.
///
/// # Errors
///
/// Returns [`OffsetError::InvalidArgument`] unless the call has exactly one
/// integer argument.
pub fn parse_single_int_arg(text: &str) -> Result<i64> {
    let call = parse_call(text)?;
    match call.args.as_slice() {
        [Arg::Int(n)] => Ok(*n),
        _ => Err(OffsetError::InvalidArgument(format!(
            "expected exactly one integer argument: '{}'",
            text.trim()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_int_arg() {
        assert_eq!(parse_single_int_arg("coord:current(-3)").unwrap(), -3);
        assert_eq!(parse_single_int_arg(" coord:current( 12 ) ").unwrap(), 12);
        assert_eq!(parse_single_int_arg("coord:current(0)").unwrap(), 0);
    }

    #[test]
    fn test_parse_single_int_arg_rejects_other_shapes() {
        for bad in [
            "coord:current()",
            "coord:current(1, 2)",
            "coord:current('x')",
            "coord:current(1",
            "coord:current",
            "coord:current(one)",
        ] {
            let err = parse_single_int_arg(bad).unwrap_err();
            assert!(matches!(err, OffsetError::InvalidArgument(_)), "{bad}: {err}");
        }
    }

    #[test]
    fn test_parse_call_mixed_args() {
        let call = parse_call("elext:dataIn('logs', 'a,b')").unwrap();
        assert_eq!(call.name, "elext:dataIn");
        assert_eq!(call.local_name(), "dataIn");
        assert_eq!(
            call.args,
            vec![Arg::Text("logs".to_string()), Arg::Text("a,b".to_string())]
        );
    }

    #[test]
    fn test_parse_call_ints() {
        let call = parse_call("currentYear(2, 3, -4, 5)").unwrap();
        assert_eq!(call.local_name(), "currentYear");
        assert_eq!(call.int_args().unwrap(), vec![2, 3, -4, 5]);
    }

    #[test]
    fn test_parse_call_no_args() {
        let call = parse_call("now()").unwrap();
        assert!(call.args.is_empty());
    }

    #[test]
    fn test_parse_call_errors() {
        assert!(parse_call("(1)").is_err());
        assert!(parse_call("today(1,)").is_err());
        assert!(parse_call("today(1, )").is_err());
        assert!(parse_call("today(1 2)").is_err());
        assert!(parse_call("dataIn('x)").is_err());
        assert!(parse_call("dataIn('x' 'y')").is_err());
    }

    #[test]
    fn test_int_args_rejects_text() {
        let call = parse_call("today('a', 1)").unwrap();
        assert!(call.int_args().is_err());
    }
}
