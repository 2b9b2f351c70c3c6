use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncates to at most `max_width` terminal columns, ending in "..." when cut.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let budget = max_width.saturating_sub(3);
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push_str("...");
    out
}

/// One flag per question: true for blocks up to and including the current one.
pub fn progress_blocks(current_index: usize, total: usize) -> Vec<bool> {
    (0..total).map(|i| i <= current_index).collect()
}

/// Width of each progress segment so `total` segments fit in `width` columns
/// with one column of spacing between them.
pub fn segment_width(width: u16, total: usize) -> u16 {
    if total == 0 {
        return 0;
    }
    let gaps = total.saturating_sub(1) as u16;
    (width.saturating_sub(gaps) / total as u16).max(1)
}
