use indexmap::IndexMap;

use crate::types::{FileBlame, Span, SpanMap};

/// Authors covering `span`, clamped to the available lines.
fn slice_for<'a>(authors: &'a [String], span: Span) -> &'a [String] {
    let start = (span.first_line.saturating_sub(1) as usize).min(authors.len());
    let end = (span.last_line as usize).min(authors.len());
    if start >= end {
        return &[];
    }
    &authors[start..end]
}

/// Most frequent author in `lines`; ties go to whoever appears first.
pub fn dominant_author(lines: &[String]) -> Option<&str> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for author in lines {
        *counts.entry(author.as_str()).or_insert(0) += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for (author, count) in counts {
        match best {
            Some((_, top)) if count <= top => {}
            _ => best = Some((author, count)),
        }
    }
    best.map(|(author, _)| author)
}

/// Attribute each span to the dominant author of its lines.
///
/// Spans with no authorship lines are left out of the result.
pub fn aggregate(spans: &SpanMap, authors: &[String]) -> FileBlame {
    let mut result = FileBlame::new();
    for (name, span) in spans {
        if let Some(author) = dominant_author(slice_for(authors, *span)) {
            result.insert(name.clone(), author.to_string());
        }
    }
    result
}
