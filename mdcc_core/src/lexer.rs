use logos::Lexer;
use logos::Logos;

/// Raw tokens produced by logos for the attribute payload of a directive.
///
/// Unquoted values are not tokenized here since they may contain almost any
/// character. The walker reads them straight from the remainder instead.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum RawToken {
	#[token("=")]
	Equals,
	#[regex(r"[ \t\r\n\f]+")]
	Whitespace,
	#[regex(r"[A-Za-z_:][A-Za-z0-9_:.-]*")]
	Key,
	#[regex(r#""[^"]*""#)]
	DoubleQuotedString,
	#[regex(r"'[^']*'")]
	SingleQuotedString,
}

/// The raw value of a single attribute token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawValue<'a> {
	/// `key="value"` or `key='value'` (quotes stripped).
	Quoted(&'a str),
	/// `key=value`, running until whitespace or `>`.
	Unquoted(&'a str),
	/// A bare `key`.
	Flag,
}

/// One `key`, `key=value` or `key="value"` token from an attribute payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute<'a> {
	pub key: &'a str,
	pub value: RawValue<'a>,
}

/// Tokenize a complete attribute payload.
///
/// Returns `None` as soon as any part of the payload cannot be consumed as an
/// attribute token, or when two tokens are not separated by whitespace.
pub fn tokenize_attributes(source: &str) -> Option<Vec<Attribute<'_>>> {
	let mut lexer = RawToken::lexer(source);
	let mut attributes = Vec::new();
	let mut needs_separator = false;

	while let Some(token) = lexer.next() {
		match token {
			Ok(RawToken::Whitespace) => needs_separator = false,
			Ok(RawToken::Key) if !needs_separator => {
				attributes.push(read_attribute(&mut lexer)?);
				needs_separator = true;
			}
			_ => return None,
		}
	}

	Some(attributes)
}

/// Read the leading `name="value"` token of a JSON payload.
///
/// Returns the value and whatever follows the closing quote. The value must
/// be non-empty and double quoted.
pub fn name_attribute(source: &str) -> Option<(&str, &str)> {
	let mut lexer = RawToken::lexer(source);

	if lexer.next()? != Ok(RawToken::Key) || lexer.slice() != "name" {
		return None;
	}

	if lexer.next()? != Ok(RawToken::Equals) {
		return None;
	}

	if lexer.next()? != Ok(RawToken::DoubleQuotedString) {
		return None;
	}

	let value = unquote(lexer.slice());
	if value.is_empty() {
		return None;
	}

	Some((value, lexer.remainder()))
}

/// Called with the lexer positioned just after a `Key` token.
fn read_attribute<'a>(lexer: &mut Lexer<'a, RawToken>) -> Option<Attribute<'a>> {
	let key = lexer.slice();

	if !lexer.remainder().starts_with('=') {
		return Some(Attribute {
			key,
			value: RawValue::Flag,
		});
	}

	// consume `=`
	lexer.next();
	let remainder = lexer.remainder();

	let value = if remainder.starts_with(['"', '\'']) {
		match lexer.next()? {
			Ok(RawToken::DoubleQuotedString | RawToken::SingleQuotedString) => {
				RawValue::Quoted(unquote(lexer.slice()))
			}
			_ => return None,
		}
	} else {
		let end = remainder
			.find(|c: char| c.is_whitespace() || c == '>')
			.unwrap_or(remainder.len());

		if end == 0 {
			return None;
		}

		lexer.bump(end);
		RawValue::Unquoted(&remainder[..end])
	};

	Some(Attribute { key, value })
}

fn unquote(slice: &str) -> &str {
	&slice[1..slice.len() - 1]
}
