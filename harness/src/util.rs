use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathOrStd {
    Path(PathBuf),
    StdStream,
}

impl From<&std::ffi::OsStr> for PathOrStd {
    fn from(value: &std::ffi::OsStr) -> Self {
        if value == "-" {
            Self::StdStream
        } else {
            Self::Path(value.into())
        }
    }
}

/// Reads a flag the way the grammar editor writes it: `true` or `false` in any case, surrounding
/// whitespace ignored. Anything else counts as `false`.
pub fn parse_flag(arg: &str) -> bool {
    arg.trim().eq_ignore_ascii_case("true")
}

/// Byte offset of the character at `char_index`, or the length of `source` past its end.
pub fn byte_offset(source: &str, char_index: usize) -> usize {
    source
        .char_indices()
        .nth(char_index)
        .map_or(source.len(), |(offset, _)| offset)
}
