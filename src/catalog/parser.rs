use super::Song;
use std::path::Path;

/// Literal separator between catalog records
pub const RECORD_DELIMITER: &str = "***";

const FILE_TAG: &str = "Arquivo=";
const ARTIST_TAG: &str = "Artista=";
const TITLE_TAG: &str = "Musica=";

/// Parse a catalog text blob into songs.
///
/// Lenient: a record missing any of the four fields is dropped without an
/// error. Text with no delimiter at all is treated as a single record.
/// Video paths are resolved against `folder`.
pub fn parse(content: &str, folder: &Path) -> Vec<Song> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    content
        .split(RECORD_DELIMITER)
        .filter(|record| !record.trim().is_empty())
        .filter_map(|record| parse_record(record, folder))
        .collect()
}

/// Parse a single record. `None` when a required field is absent.
pub fn parse_record(record: &str, folder: &Path) -> Option<Song> {
    let id = find_id(record)?;
    let file = find_field(record, FILE_TAG)?;
    let artist = find_field(record, ARTIST_TAG)?;
    let title = find_field(record, TITLE_TAG)?;

    Some(Song {
        id,
        title: title.to_string(),
        artist: artist.to_string(),
        duration: 0.0,
        video_path: folder.join(file),
        video_exists: None,
    })
}

/// First bracket group holding only digits, e.g. `[123]`
fn find_id(record: &str) -> Option<u32> {
    let mut rest = record;
    while let Some(open) = rest.find('[') {
        let after = &rest[open + 1..];
        let close = after.find(']')?;
        let inner = after[..close].trim();
        if !inner.is_empty() && inner.bytes().all(|b| b.is_ascii_digit()) {
            // Overlong ids are malformed, not a different song
            return inner.parse().ok();
        }
        rest = &after[close + 1..];
    }
    None
}

/// Value after `tag`, up to the end of the line or a closing bracket
fn find_field<'a>(record: &'a str, tag: &str) -> Option<&'a str> {
    let start = record.find(tag)? + tag.len();
    let tail = &record[start..];
    let end = tail
        .find(|c| matches!(c, '\n' | '\r' | ']'))
        .unwrap_or(tail.len());
    let value = tail[..end].trim();
    (!value.is_empty()).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn folder() -> PathBuf {
        PathBuf::from("/media/karaoke")
    }

    #[test]
    fn test_bracketed_single_line_record() {
        let songs = parse("[1][Arquivo= a.mp4][Artista= X][Musica= Y]***", &folder());
        assert_eq!(songs.len(), 1);
        let s = &songs[0];
        assert_eq!(s.id, 1);
        assert_eq!(s.title, "Y");
        assert_eq!(s.artist, "X");
        assert_eq!(s.duration, 0.0);
        assert_eq!(s.video_path, PathBuf::from("/media/karaoke/a.mp4"));
        assert_eq!(s.video_exists, None);
    }

    #[test]
    fn test_line_per_field_any_order() {
        let text = "\
[00123]
Musica= Evidências
Arquivo= 00123.mp4
Artista= Chitãozinho & Xororó
***
[200]
Artista= Alceu Valença
Arquivo= 200.mp4
Musica= Anunciação
***";
        let songs = parse(text, &folder());
        assert_eq!(songs.len(), 2);
        assert_eq!(songs[0].id, 123);
        assert_eq!(songs[0].title, "Evidências");
        assert_eq!(songs[0].artist, "Chitãozinho & Xororó");
        assert_eq!(songs[1].id, 200);
        assert_eq!(songs[1].video_path, PathBuf::from("/media/karaoke/200.mp4"));
    }

    #[test]
    fn test_records_missing_fields_are_dropped() {
        let text = "\
[1]\nArquivo= a.mp4\nArtista= A\nMusica= Song A\n***\
[2]\nArquivo= b.mp4\nMusica= No Artist\n***\
Arquivo= c.mp4\nArtista= C\nMusica= No Id\n***\
[4]\nArquivo=\nArtista= D\nMusica= Empty File\n***\
[5]\nArquivo= e.mp4\nArtista= E\nMusica= Song E\n";
        let songs = parse(text, &folder());
        let ids: Vec<u32> = songs.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 5]);
    }

    #[test]
    fn test_no_delimiter_single_attempt() {
        assert!(parse("just some notes about songs", &folder()).is_empty());
        let one = parse("[7] Arquivo= x.mp4\nArtista= A\nMusica= B", &folder());
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].id, 7);
    }

    #[test]
    fn test_duplicate_ids_kept() {
        let text = "[1][Arquivo= a.mp4][Artista= A][Musica= First]***[1][Arquivo= b.mp4][Artista= B][Musica= Second]";
        let songs = parse(text, &folder());
        assert_eq!(songs.len(), 2);
        assert_eq!(songs[0].title, "First");
        assert_eq!(songs[1].title, "Second");
    }

    #[test]
    fn test_id_skips_non_numeric_brackets() {
        let song = parse_record("[Arquivo= a.mp4] [42] [Artista= X] [Musica= Y]", &folder());
        assert_eq!(song.map(|s| s.id), Some(42));
    }

    #[test]
    fn test_bom_and_crlf() {
        let text = "\u{feff}[9]\r\nArquivo= nine.mp4\r\nArtista= N\r\nMusica= Nine\r\n***\r\n";
        let songs = parse(text, &folder());
        assert_eq!(songs.len(), 1);
        assert_eq!(songs[0].title, "Nine");
        assert_eq!(songs[0].video_path, PathBuf::from("/media/karaoke/nine.mp4"));
    }

    #[test]
    fn test_overflowing_id_is_malformed() {
        let text = "[99999999999][Arquivo= a.mp4][Artista= X][Musica= Y]";
        assert!(parse(text, &folder()).is_empty());
    }
}
