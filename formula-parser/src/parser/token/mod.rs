pub mod op;

use crate::{
    parser::{error::{kind, Error}, Parser, Parse},
    tokenizer::TokenKind,
};
use std::ops::Range;

/// Generates a unit struct for each token kind, as well as a simple [`Parse`] implementation for
/// each token kind. This enables the parser to use and request token kinds as a type, which is
/// much more ergonomic than using a string.
macro_rules! token_kinds {
    ($($name:ident)*) => {
        $(
            #[derive(Clone, Debug, PartialEq)]
            pub struct $name {
                pub lexeme: String,
                pub span: Range<usize>,
            }

            impl Parse for $name {
                fn parse(input: &mut Parser) -> Result<Self, Error> {
                    let token = input.next_token()?;

                    if token.kind == TokenKind::$name {
                        Ok(Self {
                            lexeme: token.lexeme.to_owned(),
                            span: token.span,
                        })
                    } else {
                        Err(Error::new(vec![token.span], kind::UnexpectedToken {
                            expected: &[TokenKind::$name],
                            found: token.kind,
                        }))
                    }
                }
            }
        )*
    };
}

token_kinds!(
    OpenSquare
    CloseSquare
);

/// Parses the command with the given name, such as `\right`, returning its span. An error
/// pointing at the found token is returned if it is anything else.
pub fn parse_command(input: &mut Parser, name: &str) -> Result<Range<usize>, Error> {
    let token = input.next_token()?;
    if token.kind == TokenKind::Command && token.lexeme == name {
        Ok(token.span)
    } else {
        Err(Error::new(vec![token.span], kind::UnexpectedToken {
            expected: &[TokenKind::Command],
            found: token.kind,
        }))
    }
}
