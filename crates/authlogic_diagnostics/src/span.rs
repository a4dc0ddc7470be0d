//! Span - 源码位置信息
//!
//! 词法单元和诊断都用字节偏移范围定位源码

/// 源码位置范围 (字节偏移)
pub type Span = std::ops::Range<usize>;

/// 把字节偏移换算为 1 起始的 (行, 列)
///
/// 列按字符计数。偏移超过源码长度时定位到末尾。
pub fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(source.len());
    let mut line = 1;
    let mut line_start = 0;
    for (idx, ch) in source.char_indices() {
        if idx >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            line_start = idx + 1;
        }
    }
    let col = source
        .get(line_start..offset)
        .map(|s| s.chars().count())
        .unwrap_or(0)
        + 1;
    (line, col)
}
