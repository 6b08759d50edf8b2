//! # ccommits syntax
//!
//! Lexer, parser and AST for Conventional Commits v1.0.0 messages.
//!
//! ## Overview
//!
//! - **Lexer**: ordered pattern rules turn a commit message into tokens
//!   with zero-based line/column positions (columns in UTF-16 code units)
//! - **Parser**: recursive descent over the token stream; the header is
//!   strict, body and comments are collected without validation, and an
//!   appended `diff --git` section is ignored
//! - **Errors**: the first violation comes back as a structured
//!   [`ParseError`] carrying the offending token and the expected kinds
//!
//! ## Architecture
//!
//! ```text
//! Commit message
//!     ↓
//! truncate_diff
//!     ↓
//! Lexer (lazy, one token of lookahead)
//!     ↓
//! Parser
//!     ↓
//! CommitMessage | ParseError
//! ```
//!
//! ## Example
//!
//! ```rust
//! use ccommits_syntax::{parse_commit, CommitType};
//!
//! let msg = parse_commit("feat(api)!: change shape\n").expect("valid header");
//! assert_eq!(msg.title.commit_type, CommitType::Feat);
//! assert_eq!(msg.title.scope.as_deref(), Some("api"));
//! assert!(msg.title.breaking);
//!
//! let err = parse_commit("feat my message").unwrap_err();
//! assert_eq!(err.span().col, 4);
//! ```
//!
//! ## Grammar
//!
//! ```text
//! CommitMessage := CommitTitle (Newline+ | EOF) (BodyLine | Comment)* DiffSection?
//! CommitTitle   := CommitType Scope? '!'? ':' Whitespace Description
//! ```

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;

pub use ast::*;
pub use error::{LexError, ParseError, ParseFailure, Span};
pub use lexer::{DIFF_MARKER, Lexer, Token, TokenKind, tokenize, truncate_diff};
pub use parser::{Parser, header_is_empty, parse, parse_commit};
