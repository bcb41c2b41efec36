/// One structural unit of a rendered document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, text: String },
    Paragraph(String),
    Bullet(String),
}

/// An ordered block sequence. Built append-only by the renderers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn heading(&mut self, level: u8, text: impl Into<String>) -> &mut Self {
        self.blocks.push(Block::Heading {
            level,
            text: text.into(),
        });
        self
    }

    pub fn paragraph(&mut self, text: impl Into<String>) -> &mut Self {
        self.blocks.push(Block::Paragraph(text.into()));
        self
    }

    pub fn bullet(&mut self, text: impl Into<String>) -> &mut Self {
        self.blocks.push(Block::Bullet(text.into()));
        self
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Text of every heading at `level`, in order.
    pub fn headings(&self, level: u8) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Heading { level: l, text } if *l == level => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Blocks between the level-1 heading `title` and the next level-1 heading.
    pub fn section(&self, title: &str) -> Option<&[Block]> {
        let is_h1 = |b: &Block| matches!(b, Block::Heading { level: 1, .. });
        let start = self.blocks.iter().position(
            |b| matches!(b, Block::Heading { level: 1, text } if text == title),
        )? + 1;
        let len = self.blocks[start..]
            .iter()
            .position(is_h1)
            .unwrap_or(self.blocks.len() - start);
        Some(&self.blocks[start..start + len])
    }
}
