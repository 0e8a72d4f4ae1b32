use super::{ExtInfStyle, Playlist, Track};

pub(super) const HEADER: &str = "#EXTM3U";
pub(super) const EXTINF: &str = "#EXTINF:";

impl Playlist {
    /// Renders the playlist as an extended m3u document.
    pub fn render(&self, style: ExtInfStyle) -> String {
        let mut output = String::new();
        output.push_str(HEADER);
        output.push('\n');
        for track in &self.tracks {
            write_track(&mut output, track, style);
        }
        output
    }
}

fn write_track(output: &mut String, track: &Track, style: ExtInfStyle) {
    output.push_str(EXTINF);
    output.push_str(&track.length.to_string());
    output.push_str(match style {
        ExtInfStyle::Comma => ", ",
        ExtInfStyle::Spaced => " ",
    });

    let tags: Vec<String> = track
        .tags
        .iter()
        .filter(|tag| {
            if tag.name.is_empty() {
                log::warn!("Dropping unnamed tag of {}", track.name);
            }
            !tag.name.is_empty()
        })
        .map(|tag| format!("{}=\"{}\"", tag.key(), escape(&tag.value)))
        .collect();
    output.push_str(&tags.join(" "));

    if !tags.is_empty() || style == ExtInfStyle::Spaced {
        output.push_str(", ");
    }

    output.push_str(&single_line(&track.name));
    output.push('\n');
    output.push_str(&single_line(&track.uri));
    output.push('\n');
}

/// Escapes a tag value so it can be placed between double quotes.
fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\r' | '\n' => escaped.push(' '),
            c => escaped.push(c),
        }
    }
    escaped
}

fn single_line(value: &str) -> String {
    value.replace(['\r', '\n'], " ")
}
