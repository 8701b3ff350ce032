//! The configuration text format.
//!
//! This module documents the grammar accepted by [`parse`](crate::parse) and
//! written by [`Builder`](crate::Builder).
//!
//! # Overview
//!
//! A file is a sequence of entries. An entry is a name, an optional value, and
//! either a `;` (a *leaf*) or a `{ ... }` block holding more entries (a
//! *section*). Lines starting with `#` are comments.
//!
//! ```text
//! # Example configuration of an elasticsearch database
//! database testdb {
//!     type elasticsearch;
//!     node node-00 {
//!         host 192.168.1.10;
//!         port 9200;
//!     }
//!     options {
//!         motd "Hello, \"world\"\n";
//!     }
//! }
//! ```
//!
//! # Grammar
//!
//! ```text
//! config   := entry*
//! entry    := comment | name value? (';' | '{' config '}')
//! value    := quoted | unquoted
//! quoted   := '"' (escape | any-except['"', '\'])* '"'
//! escape   := '\' ('0' | '"' | '\' | 'b' | 'f' | 'n' | 'r' | 't')
//! unquoted := [A-Za-z0-9._-]+
//! name     := [A-Za-z_][A-Za-z0-9_]*
//! comment  := '#' any-except['\n']* '\n'
//! ```
//!
//! ## Whitespace
//!
//! - Between entries: space, tab, carriage return and newline.
//! - Between a name and its value: space or tab only, and at least one.
//!   `name{` and a name followed by a newline are errors.
//! - Between a value and its `;` or `{`: any whitespace, including newlines.
//!
//! ## Values
//!
//! | Form | Example | Notes |
//! |------|---------|-------|
//! | Unquoted | `port 9200;` | letters, digits, `-`, `.`, `_` |
//! | Quoted | `motd "two words";` | any text, with escapes |
//! | Empty quoted | `prefix "";` | the empty string |
//! | No value | `events { ... }` | sections only; the tag is empty |
//!
//! Escape sequences inside quotes:
//!
//! | Escape | Character |
//! |--------|-----------|
//! | `\0` | NUL |
//! | `\"` | `"` |
//! | `\\` | `\` |
//! | `\b` | backspace |
//! | `\f` | form feed |
//! | `\n` | newline |
//! | `\r` | carriage return |
//! | `\t` | tab |
//!
//! Any other escaped character is an error.
//!
//! ## Sections
//!
//! A section's value is its *tag*. Tags let sibling sections with the same
//! name be told apart in queries (`database/node:node-00/port`). Sections may
//! nest to any depth up to [`ParseOptions::max_depth`](crate::ParseOptions).
//!
//! ## Comments
//!
//! `#` starts a comment that runs to the end of the line. Comments may appear
//! wherever an entry may start; inside an entry `#` is an error (and inside
//! quotes it is ordinary text). The last line of a file may be a comment
//! without a trailing newline.
//!
//! # Errors
//!
//! Parsing stops at the first problem:
//!
//! - a character the grammar does not allow at that point;
//! - an unknown escape sequence;
//! - input ending inside an entry or inside an open section;
//! - a `}` with no open section;
//! - sections nested deeper than the configured limit.
//!
//! # Writing
//!
//! The builder writes one entry per line, indents each nesting level with a
//! tab, and writes a value bare when it is non-empty and made only of ASCII
//! letters, digits and `_ / . [ ] :`. Every other value is quoted, with
//! `\0 \b \f \n \r \t \\ \"` escaped.
//!
//! Bare `/`, `[`, `]` and `:` are not unquoted-value characters for the
//! parser, so a value such as `/var/log` passed to `write_value` is written
//! bare and cannot be read back. Writing a whole tree (`write_node`,
//! `to_string`) quotes those values as well, so a rendered tree always parses
//! back to an equal tree.

// This module contains only documentation; no implementation code
