/// Convert a zero-based line and UTF-16 column into a byte offset.
///
/// Editors report positions in UTF-16 code units; the parser works on bytes.
/// Positions past the end of a line clamp to the line end, lines past the
/// end of the text clamp to the text length.
pub fn line_col_to_offset(content: &str, line: usize, utf16_col: usize) -> usize {
    let mut line_start = 0;
    for (i, l) in content.split_inclusive('\n').enumerate() {
        if i == line {
            return line_start + utf16_col_to_byte_col(l, utf16_col);
        }
        line_start += l.len();
    }
    content.len()
}

fn utf16_col_to_byte_col(line_content: &str, utf16_col: usize) -> usize {
    let mut curr_utf16 = 0;
    let mut curr_byte = 0;

    for c in line_content.chars() {
        if curr_utf16 >= utf16_col || c == '\n' {
            break;
        }
        curr_utf16 += c.len_utf16();
        curr_byte += c.len_utf8();
    }
    curr_byte
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col_to_offset() {
        let text = "def a = 1\nfoo.bar()\n";
        assert_eq!(line_col_to_offset(text, 0, 4), 4);
        assert_eq!(line_col_to_offset(text, 1, 4), 14);
        assert_eq!(line_col_to_offset(text, 1, 99), 19);
        assert_eq!(line_col_to_offset(text, 7, 0), text.len());
    }

    #[test]
    fn test_utf16_columns() {
        // '€' is one UTF-16 unit but three bytes
        let text = "'€'.size()";
        assert_eq!(line_col_to_offset(text, 0, 3), 5);
    }
}
