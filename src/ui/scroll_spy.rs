/// Sections of the portfolio page, top to bottom.
pub const PORTFOLIO_SECTIONS: [&str; 6] = ["home", "about", "skills", "projects", "memos", "contact"];

/// How far below the top of the viewport a section counts as reached.
pub const NAVIGATION_OFFSET: f64 = 100.0;

#[derive(Debug, Clone, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub offset_top: f64,
    pub height: f64,
}

impl SectionBounds {
    pub fn new(id: impl Into<String>, offset_top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            offset_top,
            height,
        }
    }

    fn contains(&self, position: f64) -> bool {
        position >= self.offset_top && position < self.offset_top + self.height
    }
}

/// The first section containing the navigation line for `scroll_y`.
pub fn section_for(scroll_y: f64, sections: &[SectionBounds]) -> Option<&str> {
    let position = scroll_y + NAVIGATION_OFFSET;
    sections
        .iter()
        .find(|section| section.contains(position))
        .map(|section| section.id.as_str())
}

/// Tracks which navigation item is highlighted.
#[derive(Debug, Clone)]
pub struct ScrollSpy {
    sections: Vec<SectionBounds>,
    active: String,
}

impl ScrollSpy {
    pub fn new(sections: Vec<SectionBounds>) -> Self {
        Self {
            sections,
            active: PORTFOLIO_SECTIONS[0].to_owned(),
        }
    }

    /// Layout changed, e.g. after a resize.
    pub fn set_sections(&mut self, sections: Vec<SectionBounds>) {
        self.sections = sections;
    }

    /// Returns the active section; unchanged when no section matches.
    pub fn on_scroll(&mut self, scroll_y: f64) -> &str {
        if let Some(id) = section_for(scroll_y, &self.sections) {
            if id != self.active {
                self.active = id.to_owned();
            }
        }
        &self.active
    }

    pub fn active(&self) -> &str {
        &self.active
    }
}
