use termimad::{
    Alignment, MadSkin,
    crossterm::style::{Attribute, Color},
};

/// The two skins behind the persisted dark-mode preference.
pub struct Theme;

impl Theme {
    pub fn skin(dark_mode: bool) -> MadSkin {
        if dark_mode {
            Self::dark_skin()
        } else {
            Self::light_skin()
        }
    }

    fn dark_skin() -> MadSkin {
        let mut skin = MadSkin::default();

        skin.headers[0].set_fg(Self::YELLOW);
        skin.headers[0].add_attr(Attribute::Bold);
        skin.headers[0].align = Alignment::Left;

        skin.headers[1].set_fg(Self::BLUE);
        skin.headers[1].add_attr(Attribute::Bold);

        skin.bold.set_fg(Self::CYAN);
        skin.italic.set_fg(Self::COMMENT);
        skin.bullet.set_fg(Self::GREEN);
        skin.inline_code.set_fg(Self::GREEN);
        skin.table.set_fg(Self::PURPLE);

        skin
    }

    fn light_skin() -> MadSkin {
        let mut skin = MadSkin::default();

        skin.headers[0].set_fg(Color::DarkBlue);
        skin.headers[0].add_attr(Attribute::Bold);
        skin.headers[0].align = Alignment::Left;

        skin.headers[1].set_fg(Color::DarkMagenta);
        skin.headers[1].add_attr(Attribute::Bold);

        skin.bold.set_fg(Color::DarkCyan);
        skin.bullet.set_fg(Color::DarkGreen);
        skin.inline_code.set_fg(Color::DarkGreen);
        skin.table.set_fg(Color::DarkMagenta);

        skin
    }

    pub const YELLOW: Color = Color::Rgb {
        r: 0xE5,
        g: 0xC0,
        b: 0x7B,
    }; // #E5C07B
    pub const GREEN: Color = Color::Rgb {
        r: 0x98,
        g: 0xC3,
        b: 0x79,
    }; // #98C379
    pub const BLUE: Color = Color::Rgb {
        r: 0x61,
        g: 0xAF,
        b: 0xEF,
    }; // #61AFEF
    pub const PURPLE: Color = Color::Rgb {
        r: 0xC6,
        g: 0x78,
        b: 0xDD,
    }; // #C678DD
    pub const CYAN: Color = Color::Rgb {
        r: 0x56,
        g: 0xB6,
        b: 0xC2,
    }; // #56B6C2
    pub const COMMENT: Color = Color::Rgb {
        r: 0x5C,
        g: 0x63,
        b: 0x70,
    }; // #5C6370
}
