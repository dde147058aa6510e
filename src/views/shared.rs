use comrak::plugins::syntect::SyntectAdapter;
use comrak::{ComrakOptions, ComrakPlugins, markdown_to_html_with_plugins};
use once_cell::sync::Lazy;
use time::format_description::FormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

static MARKDOWN_OPTIONS: Lazy<ComrakOptions> = Lazy::new(|| {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.tasklist = true;
    options.extension.autolink = true;
    // Assistant output is untrusted: raw HTML stays escaped.
    options.render.unsafe_ = false;
    options
});

pub fn markdown_to_html(md: &str) -> String {
    let adapter = SyntectAdapter::new(Some("base16-ocean.dark"));
    let mut plugins = ComrakPlugins::default();
    plugins.render.codefence_syntax_highlighter = Some(&adapter);
    markdown_to_html_with_plugins(md, &MARKDOWN_OPTIONS, &plugins)
}

const NAIVE_TIMESTAMP: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

const DISPLAY_FORMAT: &[FormatItem<'static>] = format_description!(
    "[month repr:short] [day padding:none], [year] [hour repr:12 padding:zero]:[minute padding:zero] [period case:upper]"
);

/// Parse a server timestamp. Accepts RFC 3339 as well as the naive
/// `YYYY-MM-DDTHH:MM:SS[.ffffff]` form, which is taken to be UTC.
pub fn parse_timestamp(raw: &str) -> Option<OffsetDateTime> {
    let raw = raw.trim();
    if let Ok(parsed) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(parsed);
    }
    let without_fraction = raw.split('.').next()?.trim_end_matches('Z');
    PrimitiveDateTime::parse(without_fraction, NAIVE_TIMESTAMP)
        .ok()
        .map(PrimitiveDateTime::assume_utc)
}

fn format_in(datetime: OffsetDateTime, offset: UtcOffset) -> Option<String> {
    datetime.to_offset(offset).format(DISPLAY_FORMAT).ok()
}

/// Local-time rendering of a server timestamp; the raw string when it
/// cannot be parsed.
pub fn format_timestamp(raw: &str) -> String {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    parse_timestamp(raw)
        .and_then(|datetime| format_in(datetime, offset))
        .unwrap_or_else(|| raw.to_string())
}

/// Empty or whitespace-only optional text is treated as absent.
pub fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
