//! Overlapping character-window splitter for ingestion.

pub const DEFAULT_CHUNK_SIZE: usize = 1000;
pub const DEFAULT_CHUNK_OVERLAP: usize = 200;

/// A window of source text produced by splitting.
#[derive(Debug, Clone)]
pub struct TextWindow {
    pub text: String,
    /// Character offset in the original document.
    pub start_offset: usize,
    /// Window index within the source.
    pub index: usize,
}

pub struct TextSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl TextSplitter {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
            chunk_overlap,
        }
    }

    /// Split text into windows of at most `chunk_size` characters, each
    /// sharing `chunk_overlap` characters with its predecessor.
    pub fn split(&self, text: &str) -> Vec<TextWindow> {
        let chars: Vec<char> = text.chars().collect();
        let total_chars = chars.len();

        let mut windows = Vec::new();
        if total_chars == 0 {
            return windows;
        }

        let step = self.chunk_size.saturating_sub(self.chunk_overlap).max(1);
        let mut start = 0;
        let mut index = 0;

        while start < total_chars {
            let end = (start + self.chunk_size).min(total_chars);
            let window_text: String = chars[start..end].iter().collect();

            if !window_text.trim().is_empty() {
                windows.push(TextWindow {
                    text: window_text,
                    start_offset: start,
                    index,
                });
                index += 1;
            }

            if end == total_chars {
                break;
            }
            start += step;
        }

        windows
    }
}

impl Default for TextSplitter {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE, DEFAULT_CHUNK_OVERLAP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_a_single_window() {
        let windows = TextSplitter::default().split("texto corto");
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].text, "texto corto");
        assert_eq!(windows[0].start_offset, 0);
    }

    #[test]
    fn empty_text_yields_nothing() {
        assert!(TextSplitter::default().split("").is_empty());
        assert!(TextSplitter::default().split("   \n  ").is_empty());
    }

    #[test]
    fn windows_respect_size_and_overlap() {
        let splitter = TextSplitter::new(10, 4);
        let text: String = ('a'..='z').collect();
        let windows = splitter.split(&text);

        assert!(windows.len() > 1);
        for window in &windows {
            assert!(window.text.chars().count() <= 10);
        }
        // Consecutive windows start one step (size - overlap) apart.
        for pair in windows.windows(2) {
            assert_eq!(pair[1].start_offset - pair[0].start_offset, 6);
        }
        // The overlapping tail of one window is the head of the next.
        let tail: String = windows[0].text.chars().skip(6).collect();
        let head: String = windows[1].text.chars().take(4).collect();
        assert_eq!(tail, head);
    }

    #[test]
    fn full_text_is_covered() {
        let splitter = TextSplitter::new(7, 2);
        let text = "abcdefghijklmnopqrstuvwxyz0123456789";
        let windows = splitter.split(text);

        let last = windows.last().unwrap();
        assert_eq!(
            last.start_offset + last.text.chars().count(),
            text.chars().count()
        );
        assert_eq!(windows[0].index, 0);
        assert_eq!(last.index, windows.len() - 1);
    }

    #[test]
    fn multibyte_text_splits_on_characters() {
        let splitter = TextSplitter::new(5, 1);
        let windows = splitter.split("garantía añadida");
        for window in &windows {
            assert!(window.text.chars().count() <= 5);
        }
    }
}
