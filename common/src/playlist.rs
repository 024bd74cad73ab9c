use crate::error::FillError;
use crate::types::{Candidate, CandidateList};
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::HashSet;
use std::fs;
use std::io::BufRead;

/// Reads an m3u-style playlist and returns every entry it names, with its size. Lines starting
/// with '#' are comments, whatever follows the '#'. Relative entries are taken relative to
/// `base`, if one is given. Any entry we can't stat stops the whole thing.
///
pub fn load_playlist<R: BufRead>(
    reader: R,
    base: Option<&Utf8Path>,
) -> Result<CandidateList, FillError> {
    let mut seen = HashSet::new();
    let mut ret = CandidateList::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(FillError::PlaylistRead)?;
        let line = match index {
            0 => line.trim_start_matches('\u{feff}').trim(),
            _ => line.trim(),
        };

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut path = entry_path(line)?;

        if let Some(base) = base
            && path.is_relative()
        {
            path = base.join(path);
        }

        if !seen.insert(path.clone()) {
            log::debug!("{} is listed more than once", path);
            continue;
        }

        let size = file_size(&path)?;
        ret.push(Candidate { path, size });
    }

    log::info!("loaded {} playlist entries", ret.len());
    Ok(ret)
}

fn file_size(path: &Utf8Path) -> Result<u64, FillError> {
    let metadata = fs::metadata(path).map_err(|source| FillError::Stat {
        path: path.to_path_buf(),
        source,
    })?;

    if metadata.is_file() {
        Ok(metadata.len())
    } else {
        Err(FillError::NotAFile(path.to_path_buf()))
    }
}

/// Turns a playlist entry into a filesystem path. Entries may be bare paths, or URIs like
/// file:///music/My%20Song.mp3, in which case the scheme, host, query and fragment are
/// dropped.
///
pub fn entry_path(entry: &str) -> Result<Utf8PathBuf, FillError> {
    let path = match strip_scheme(entry) {
        Some(rest) => {
            let rest = match rest.strip_prefix("//") {
                Some(authority_and_path) => authority_and_path
                    .find('/')
                    .map_or("", |idx| &authority_and_path[idx..]),
                None => rest,
            };
            rest.split(['?', '#']).next().unwrap_or_default()
        }
        None => entry,
    };

    Ok(Utf8PathBuf::from(percent_decode(path)?))
}

// Only file: or a scheme followed by an authority counts as a URI. Anything else with a colon
// in it, like "AC:DC/Back in Black.mp3" or a drive letter, is a path.
fn strip_scheme(entry: &str) -> Option<&str> {
    let (scheme, rest) = entry.split_once(':')?;
    let mut chars = scheme.chars();

    let valid = scheme.len() > 1
        && chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));

    if valid && (rest.starts_with("//") || scheme.eq_ignore_ascii_case("file")) {
        Some(rest)
    } else {
        None
    }
}

/// Decodes %XX escapes. A '%' which isn't followed by two hex digits is left alone.
///
pub fn percent_decode(input: &str) -> Result<String, FillError> {
    if !input.contains('%') {
        return Ok(input.to_string());
    }

    let bytes = input.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut index = 0;

    while index < bytes.len() {
        if bytes[index] == b'%'
            && index + 2 < bytes.len()
            && let (Some(hi), Some(lo)) = (hex_value(bytes[index + 1]), hex_value(bytes[index + 2]))
        {
            decoded.push((hi << 4) | lo);
            index += 3;
            continue;
        }

        decoded.push(bytes[index]);
        index += 1;
    }

    String::from_utf8(decoded).map_err(|_| FillError::Encoding(input.to_string()))
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(10 + byte - b'a'),
        b'A'..=b'F' => Some(10 + byte - b'A'),
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::ErrorKind;
    use crate::fixtures::fixture;
    use camino_tempfile::tempdir;
    use std::io::Cursor;

    #[test]
    fn test_percent_decode() {
        assert_eq!("plain", percent_decode("plain").unwrap());
        assert_eq!("My Song.mp3", percent_decode("My%20Song.mp3").unwrap());
        assert_eq!("Motörhead", percent_decode("Mot%C3%B6rhead").unwrap());
        assert_eq!("100%", percent_decode("100%").unwrap());
        assert_eq!("50%zz", percent_decode("50%zz").unwrap());
        assert_eq!("%2", percent_decode("%2").unwrap());
        assert_eq!("a%41", percent_decode("a%2541").unwrap());
        assert!(matches!(
            percent_decode("%FF%FE"),
            Err(FillError::Encoding(_))
        ));
    }

    #[test]
    fn test_entry_path() {
        assert_eq!(
            Utf8PathBuf::from("/music/a b.mp3"),
            entry_path("file:///music/a%20b.mp3").unwrap()
        );

        assert_eq!(
            Utf8PathBuf::from("/music/a.mp3"),
            entry_path("file://localhost/music/a.mp3").unwrap()
        );

        assert_eq!(
            Utf8PathBuf::from("/music/a.mp3"),
            entry_path("file:/music/a.mp3").unwrap()
        );

        assert_eq!(
            Utf8PathBuf::from("/music/a.mp3"),
            entry_path("file:///music/a.mp3?x=1#frag").unwrap()
        );

        assert_eq!(
            Utf8PathBuf::from("/music/Song #1?.mp3"),
            entry_path("/music/Song #1?.mp3").unwrap()
        );

        assert_eq!(
            Utf8PathBuf::from("Artist/a b.mp3"),
            entry_path("Artist/a%20b.mp3").unwrap()
        );

        assert_eq!(
            Utf8PathBuf::from("C:/music/a.mp3"),
            entry_path("C:/music/a.mp3").unwrap()
        );

        assert_eq!(
            Utf8PathBuf::from("/music/a.mp3"),
            entry_path("FILE:/music/a.mp3").unwrap()
        );

        assert_eq!(
            Utf8PathBuf::from("/music/a.mp3"),
            entry_path("http://host/music/a.mp3").unwrap()
        );
    }

    #[test]
    fn test_entry_path_colon_in_name() {
        assert_eq!(
            Utf8PathBuf::from("AC:DC/Back in Black.mp3"),
            entry_path("AC:DC/Back%20in%20Black.mp3").unwrap()
        );

        assert_eq!(
            Utf8PathBuf::from("/music/Live:2001/a.mp3"),
            entry_path("/music/Live:2001/a.mp3").unwrap()
        );
    }

    #[test]
    fn test_load_playlist_fixture() {
        let dir = fixture("");
        let playlist = fs::read_to_string(dir.join("playlist.m3u")).unwrap();
        let mut actual: Vec<(String, u64)> = load_playlist(Cursor::new(playlist), Some(&dir))
            .unwrap()
            .into_iter()
            .map(|c| {
                (
                    c.path.strip_prefix(&dir).unwrap().to_string(),
                    c.size,
                )
            })
            .collect();

        let mut expected = vec![
            ("music/Artist/Album/track1.mp3".to_string(), 10_u64),
            ("music/Artist/Album/track2.mp3".to_string(), 20),
            ("music/Other Artist/song.mp3".to_string(), 30),
        ];

        actual.sort();
        expected.sort();
        assert_eq!(expected, actual);
    }

    #[test]
    fn test_load_playlist_skips_comments_blanks_and_duplicates() {
        let tmp = tempdir().unwrap();
        let file = tmp.path().join("a.mp3");
        fs::write(&file, "12345").unwrap();

        let playlist = format!(
            "#EXTM3U\n#EXTINF:123,Someone - Something\n{file}\n\n   \nfile://{file}\r\n",
            file = file
        );

        let actual = load_playlist(Cursor::new(playlist), None).unwrap();

        assert_eq!(vec![Candidate { path: file, size: 5 }], actual);
    }

    #[test]
    fn test_load_playlist_byte_order_mark() {
        let tmp = tempdir().unwrap();
        let file = tmp.path().join("a.mp3");
        fs::write(&file, "12345").unwrap();

        let playlist = format!("\u{feff}#EXTM3U\n{}\n", file);
        let actual = load_playlist(Cursor::new(playlist), None).unwrap();

        assert_eq!(vec![Candidate { path: file, size: 5 }], actual);
    }

    #[test]
    fn test_load_playlist_byte_order_mark_on_entry() {
        let tmp = tempdir().unwrap();
        let file = tmp.path().join("a.mp3");
        fs::write(&file, "12345").unwrap();

        let playlist = format!("\u{feff}{}\n", file);
        let actual = load_playlist(Cursor::new(playlist), None).unwrap();

        assert_eq!(vec![Candidate { path: file, size: 5 }], actual);
    }

    #[test]
    fn test_load_playlist_missing_file() {
        let tmp = tempdir().unwrap();
        let playlist = format!("{}\n", tmp.path().join("nope.mp3"));
        let err = load_playlist(Cursor::new(playlist), None).unwrap_err();

        assert!(matches!(err, FillError::Stat { .. }));
        assert_eq!(ErrorKind::Loader, err.kind());
    }

    #[test]
    fn test_load_playlist_directory_entry() {
        let tmp = tempdir().unwrap();
        let playlist = format!("{}\n", tmp.path());

        assert!(matches!(
            load_playlist(Cursor::new(playlist), None),
            Err(FillError::NotAFile(_))
        ));
    }

    #[test]
    fn test_load_playlist_empty() {
        assert!(load_playlist(Cursor::new("#EXTM3U\n"), None)
            .unwrap()
            .is_empty());
    }
}
