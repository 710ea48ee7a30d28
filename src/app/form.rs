//! State of the generation view's form.

use crate::generate::{Field, GENRES, GenerationRequest};

#[derive(Debug, Clone, Default)]
pub struct CreateForm {
    pub title: String,
    /// Index into `GENRES`; `None` until the user picks one.
    pub genre: Option<usize>,
    pub prompt: String,
    pub focus: FormFocus,
    /// Audio URL returned by the last successful generation.
    pub generated_music: Option<String>,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum FormFocus {
    #[default]
    Title,
    Genre,
    Prompt,
}

impl From<FormFocus> for Field {
    fn from(f: FormFocus) -> Self {
        match f {
            FormFocus::Title => Field::Title,
            FormFocus::Genre => Field::Genre,
            FormFocus::Prompt => Field::Prompt,
        }
    }
}

impl CreateForm {
    pub fn genre_name(&self) -> &str {
        self.genre.and_then(|i| GENRES.get(i)).copied().unwrap_or("")
    }

    pub fn request(&self) -> GenerationRequest {
        GenerationRequest::new(&self.title, self.genre_name(), &self.prompt)
    }

    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            FormFocus::Title => FormFocus::Genre,
            FormFocus::Genre => FormFocus::Prompt,
            FormFocus::Prompt => FormFocus::Title,
        };
    }

    pub fn focus_prev(&mut self) {
        self.focus = match self.focus {
            FormFocus::Title => FormFocus::Prompt,
            FormFocus::Genre => FormFocus::Title,
            FormFocus::Prompt => FormFocus::Genre,
        };
    }

    /// Type into the focused text field. Ignored on the genre picker.
    pub fn push_char(&mut self, c: char) {
        match self.focus {
            FormFocus::Title => self.title.push(c),
            FormFocus::Prompt => self.prompt.push(c),
            FormFocus::Genre => {}
        }
    }

    pub fn pop_char(&mut self) {
        match self.focus {
            FormFocus::Title => {
                self.title.pop();
            }
            FormFocus::Prompt => {
                self.prompt.pop();
            }
            FormFocus::Genre => self.genre = None,
        }
    }

    /// Step through `GENRES`, wrapping. The first step from "unset" lands on
    /// the first (forward) or last (backward) genre.
    pub fn cycle_genre(&mut self, forward: bool) {
        let n = GENRES.len();
        self.genre = Some(match (self.genre, forward) {
            (None, true) => 0,
            (None, false) => n - 1,
            (Some(i), true) => (i + 1) % n,
            (Some(i), false) => (i + n - 1) % n,
        });
    }
}
