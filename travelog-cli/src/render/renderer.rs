use super::theme::Theme;
use termimad::{
    MadSkin,
    crossterm::style::{Color, Stylize},
};
use travelog_core::{Entry, LifecycleState, MediaKind, User, resolve_url};

#[derive(Clone)]
pub struct RenderOptions {
    pub use_color: bool,
    pub dark_mode: bool,
    /// Base URL storage-relative media paths resolve against.
    pub storage_base_url: String,
}

pub struct Renderer {
    skin: MadSkin,
    opts: RenderOptions,
}

impl Renderer {
    pub fn new(opts: RenderOptions) -> Self {
        Self {
            skin: Theme::skin(opts.dark_mode),
            opts,
        }
    }

    pub fn print_md(&self, md: &str) {
        if self.opts.use_color {
            self.skin.print_text(md);
        } else {
            print!("{md}");
        }
    }

    pub fn print_info(&self, message: &str) {
        if self.opts.use_color {
            let md = format!("|-|\n| {message} |\n|-|\n");
            self.skin.print_text(&md);
        } else {
            println!("{message}");
        }
    }

    pub fn print_user(&self, user: &User) {
        let mut name = user.name.clone();
        let mut email = user.email.clone();
        if self.opts.use_color {
            name = name.with(Color::Yellow).to_string();
            email = email.with(Color::Cyan).to_string();
        }
        println!("{name} <{email}>");
        if let Some(pic) = &user.profile_pic {
            println!("  avatar: {}", resolve_url(&self.opts.storage_base_url, pic));
        }
    }

    /// One line per entry: id, title, pin, media count.
    pub fn print_entry_line(&self, entry: &Entry) {
        let mut id = entry.id.clone();
        let mut title = entry.title.clone();
        let mut pin = match entry.normalized_location() {
            Some(p) => format!("({:.4}, {:.4})", p.lat, p.lng),
            None => String::new(),
        };
        let mut extras = String::new();
        if !entry.media.is_empty() {
            extras = format!("[{} media]", entry.media.len());
        }
        if entry.state() == LifecycleState::Archived {
            extras.push_str(" (archived)");
        }
        if self.opts.use_color {
            id = id.with(Color::Cyan).to_string();
            title = title.with(Color::Yellow).to_string();
            pin = pin.with(Color::Blue).to_string();
            extras = extras.with(Color::Green).to_string();
        }
        println!("{id} {title} {pin} {extras}");
    }

    pub fn print_entries(&self, entries: &[Entry]) {
        if entries.is_empty() {
            self.print_info("No entries to display.");
            return;
        }
        for entry in entries {
            self.print_entry_line(entry);
        }
    }

    /// The full view of one entry: text, pin, dates and resolved media URLs.
    /// Unsupported media files are skipped, not reported.
    pub fn print_entry(&self, entry: &Entry) {
        let mut md = format!("# {}\n", entry.title);
        if let Some(created) = entry.created_at {
            md.push_str(&format!("*{}*\n", created.format("%d %b %Y %H:%M")));
        }
        md.push_str(&format!("\n{}\n", entry.description));
        if let Some(p) = entry.normalized_location() {
            md.push_str(&format!("\n**pin** {:.4}, {:.4}\n", p.lat, p.lng));
        }
        let media: Vec<_> = entry
            .media
            .iter()
            .filter(|m| m.kind() != MediaKind::Unsupported)
            .collect();
        if !media.is_empty() {
            md.push('\n');
            for m in media {
                md.push_str(&format!(
                    "* {} `{}`\n",
                    m.kind().as_ref(),
                    resolve_url(&self.opts.storage_base_url, &m.url)
                ));
            }
        }
        self.print_md(&md);
    }
}
