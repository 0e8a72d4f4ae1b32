use super::{
    writer::{EXTINF, HEADER},
    ExtInfStyle, Playlist, Tag, Track, UNKNOWN_LENGTH,
};

/// Parses an extended m3u document written in the given `style`, line by line.
///
/// Comment lines other than `#EXTINF` are skipped, and a uri without a preceding
/// `#EXTINF` becomes a track with an empty name.
///
/// In [ExtInfStyle::Comma] a track without tags whose name itself looks like
/// `key="value", rest` can not be told apart from a tagged track.
pub fn parse(input: &str, style: ExtInfStyle) -> Playlist {
    let mut tracks = Vec::new();
    let mut pending: Option<Track> = None;

    for line in input.lines() {
        let line = line.trim_end_matches('\r');
        if line.is_empty() || line == HEADER {
            continue;
        }

        if let Some(info) = line.strip_prefix(EXTINF) {
            pending = Some(parse_info(info, style));
            continue;
        }
        if line.starts_with('#') {
            continue;
        }

        let mut track = pending
            .take()
            .unwrap_or_else(|| Track::new(String::new(), String::new()));
        track.uri = line.to_string();
        tracks.push(track);
    }

    Playlist::new(tracks)
}

fn parse_info(info: &str, style: ExtInfStyle) -> Track {
    let length_end = info
        .char_indices()
        .find(|(i, c)| !(c.is_ascii_digit() || (*i == 0 && *c == '-')))
        .map(|(i, _)| i)
        .unwrap_or(info.len());
    let (length, rest) = info.split_at(length_end);
    let length = length.parse().unwrap_or(UNKNOWN_LENGTH);

    let (tags, name) = match style {
        ExtInfStyle::Comma => {
            let rest = rest
                .strip_prefix(", ")
                .or_else(|| rest.strip_prefix(','))
                .unwrap_or(rest);
            split_tags(rest).unwrap_or((Vec::new(), rest))
        }
        ExtInfStyle::Spaced => {
            let rest = rest.strip_prefix(' ').unwrap_or(rest);
            match rest.strip_prefix(", ") {
                Some(name) => (Vec::new(), name),
                None => split_tags(rest).unwrap_or((Vec::new(), rest)),
            }
        }
    };

    Track {
        name: name.to_string(),
        length,
        uri: String::new(),
        tags,
    }
}

/// Parses `key="value"` pairs separated by a space and terminated by `,`.
///
/// Returns the tags and the display name after the separator, or `None`
/// when `input` does not start with a complete tag list.
fn split_tags(input: &str) -> Option<(Vec<Tag>, &str)> {
    let mut tags = Vec::new();
    let mut rest = input;
    loop {
        let (tag, remaining) = parse_tag(rest)?;
        tags.push(tag);

        if let Some(name) = remaining.strip_prefix(',') {
            return Some((tags, name.strip_prefix(' ').unwrap_or(name)));
        }
        rest = remaining.strip_prefix(' ')?;
    }
}

/// Parses a leading `key="value"` pair, returning the tag and the remaining input.
fn parse_tag(input: &str) -> Option<(Tag, &str)> {
    let key_end = input
        .find(|c: char| !Tag::is_name_char(c))
        .filter(|&end| end > 0)?;
    let (key, rest) = input.split_at(key_end);
    let rest = rest.strip_prefix("=\"")?;

    let mut value = String::new();
    let mut chars = rest.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                let (_, escaped) = chars.next()?;
                value.push(escaped);
            }
            '"' => return Some((Tag::new(key, value), &rest[i + 1..])),
            c => value.push(c),
        }
    }

    None
}
