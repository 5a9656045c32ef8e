//! Slide rendering: map a [`Slide`] to a detached visual tree.
//!
//! Pure functions, no terminal access. The tree is what the controller
//! mounts; the terminal view draws whatever tree is mounted. Progress
//! fill and note visibility are left for the caller to set.

use crate::types::Slide;

/// Style class carried by every slide container.
pub const BASE_CLASS: &str = "slide";

/// One element inside a slide container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Title(String),
    Subtitle(String),
    /// Bullets and timed steps both render as plain lists.
    List(Vec<String>),
    SpeakerNote { text: String, visible: bool },
    /// Progress container; `fill_percent` is None until the caller sets it.
    ProgressBar { fill_percent: Option<u8> },
}

/// A slide container: style classes plus ordered children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideTree {
    pub classes: Vec<String>,
    pub nodes: Vec<Node>,
}

/// Build the visual tree for one slide.
///
/// Emission order is fixed: title, subtitle, bullets, timed steps,
/// speaker note, progress bar. Absent fields emit nothing, except the
/// title which is always present (possibly empty).
pub fn render_slide(slide: &Slide) -> SlideTree {
    let mut classes = vec![BASE_CLASS.to_string()];
    if let Some(kind) = &slide.kind {
        classes.push(kind.clone());
    }

    let mut nodes = vec![Node::Title(slide.title.clone())];

    if let Some(subtitle) = &slide.subtitle {
        nodes.push(Node::Subtitle(subtitle.clone()));
    }
    if !slide.bullets.is_empty() {
        nodes.push(Node::List(slide.bullets.clone()));
    }
    if !slide.timed_steps.is_empty() {
        nodes.push(Node::List(slide.timed_steps.clone()));
    }
    if let Some(note) = &slide.note {
        nodes.push(Node::SpeakerNote {
            text: note.clone(),
            visible: false,
        });
    }

    nodes.push(Node::ProgressBar { fill_percent: None });

    SlideTree { classes, nodes }
}

impl SlideTree {
    /// Type-specific class, if the slide declared one.
    pub fn variant(&self) -> Option<&str> {
        self.classes.get(1).map(String::as_str)
    }

    pub fn title(&self) -> &str {
        self.nodes
            .iter()
            .find_map(|node| match node {
                Node::Title(text) => Some(text.as_str()),
                _ => None,
            })
            .unwrap_or_default()
    }

    pub fn lists(&self) -> impl Iterator<Item = &[String]> {
        self.nodes.iter().filter_map(|node| match node {
            Node::List(items) => Some(items.as_slice()),
            _ => None,
        })
    }

    /// Number of speaker-note elements in this tree.
    pub fn note_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| matches!(node, Node::SpeakerNote { .. }))
            .count()
    }

    /// Show or hide every speaker note.
    pub fn set_notes_visible(&mut self, show: bool) {
        for node in &mut self.nodes {
            if let Node::SpeakerNote { visible, .. } = node {
                *visible = show;
            }
        }
    }

    /// Set the width of every progress fill.
    pub fn set_progress(&mut self, percent: u8) {
        for node in &mut self.nodes {
            if let Node::ProgressBar { fill_percent } = node {
                *fill_percent = Some(percent);
            }
        }
    }

    pub fn progress(&self) -> Option<u8> {
        self.nodes.iter().find_map(|node| match node {
            Node::ProgressBar { fill_percent } => *fill_percent,
            _ => None,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_slide_is_an_empty_titled_block() {
        let tree = render_slide(&Slide::default());
        assert_eq!(tree.classes, vec!["slide"]);
        assert_eq!(
            tree.nodes,
            vec![
                Node::Title(String::new()),
                Node::ProgressBar { fill_percent: None },
            ]
        );
    }

    #[test]
    fn type_adds_a_style_class() {
        let slide = Slide {
            kind: Some("title".into()),
            ..Slide::titled("Welcome")
        };
        let tree = render_slide(&slide);
        assert_eq!(tree.classes, vec!["slide", "title"]);
        assert_eq!(tree.variant(), Some("title"));
    }

    #[test]
    fn bullets_keep_their_order_without_timed_steps() {
        let slide = Slide {
            bullets: vec!["a".into(), "b".into()],
            ..Slide::titled("List")
        };
        let tree = render_slide(&slide);
        let lists: Vec<&[String]> = tree.lists().collect();
        assert_eq!(lists.len(), 1);
        assert_eq!(lists[0], ["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn elements_follow_fixed_order() {
        let slide = Slide {
            kind: None,
            title: "T".into(),
            subtitle: Some("S".into()),
            bullets: vec!["b".into()],
            timed_steps: vec!["t".into()],
            note: Some("n".into()),
        };
        let tree = render_slide(&slide);
        assert_eq!(
            tree.nodes,
            vec![
                Node::Title("T".into()),
                Node::Subtitle("S".into()),
                Node::List(vec!["b".into()]),
                Node::List(vec!["t".into()]),
                Node::SpeakerNote {
                    text: "n".into(),
                    visible: false,
                },
                Node::ProgressBar { fill_percent: None },
            ]
        );
    }

    #[test]
    fn slide_without_note_has_no_note_element() {
        let tree = render_slide(&Slide::titled("plain"));
        assert_eq!(tree.note_count(), 0);
    }

    #[test]
    fn caller_sets_progress_and_visibility() {
        let slide = Slide {
            note: Some("hint".into()),
            ..Slide::titled("T")
        };
        let mut tree = render_slide(&slide);
        assert_eq!(tree.progress(), None);

        tree.set_progress(50);
        tree.set_notes_visible(true);

        assert_eq!(tree.progress(), Some(50));
        assert!(tree.nodes.contains(&Node::SpeakerNote {
            text: "hint".into(),
            visible: true,
        }));
    }
}
