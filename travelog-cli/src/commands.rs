use crate::cli::{Command, MediaAction, ThemeArg};
use crate::render::Renderer;
use anyhow::{anyhow, Result};
use std::io::{self, Write};
use travelog_core::{
    Credentials, EntryDraft, EntryPatch, HttpApi, MediaUpload, NewUser, Point, SessionStore,
    Travelog,
};

pub async fn dispatch(
    command: Command,
    app: &mut Travelog<HttpApi>,
    store: &SessionStore,
    renderer: &Renderer,
) -> Result<()> {
    match command {
        Command::Login { email, password } => {
            let name = app.login(&Credentials { email, password }).await?.name.clone();
            persist_cookie(app, store)?;
            renderer.print_info(&format!("Logged in as {name}."));
        }
        Command::Register { name, email, password } => {
            let user = app.register(&NewUser { name, email, password }).await?;
            let name = user.name.clone();
            persist_cookie(app, store)?;
            renderer.print_info(&format!("Welcome to Travelog, {name}."));
        }
        Command::Logout => {
            app.logout().await?;
            store.clear_cookie()?;
            renderer.print_info("Logged out.");
        }
        Command::Whoami => match app.bootstrap().await? {
            Some(user) => renderer.print_user(user),
            None => renderer.print_info("Not logged in."),
        },
        Command::Add { title, description, lat, lng, media } => {
            let mut draft = EntryDraft {
                title,
                description,
                location: Some(Point::new(lat, lng)),
                media: read_uploads(&media)?,
            };
            let entry = app.create(&mut draft).await?;
            renderer.print_info("Entry added to your profile.");
            renderer.print_entry_line(&entry);
        }
        Command::List { archived } => {
            app.refresh().await?;
            let entries = if archived {
                app.store.archived()
            } else {
                app.store.active()
            };
            renderer.print_entries(entries);
        }
        Command::Recent { limit } => {
            let limit = limit.unwrap_or(app.config.recent_limit);
            let entries = app.recent(limit).await?;
            renderer.print_entries(&entries);
        }
        Command::Show { id } => {
            app.refresh().await?;
            let entry = app
                .store
                .get(&id)
                .ok_or_else(|| anyhow!("no entry {id}"))?;
            renderer.print_entry(entry);
        }
        Command::Archive { id } => {
            app.refresh().await?;
            app.archive(&id).await?;
            renderer.print_info(&format!("Archived {id}."));
        }
        Command::Restore { id } => {
            app.refresh().await?;
            app.restore(&id).await?;
            renderer.print_info(&format!("Restored {id}."));
        }
        Command::Delete { id, yes } => {
            app.refresh().await?;
            if !yes && !confirm("Delete permanently? This cannot be undone. [y/N] ")? {
                renderer.print_info("Aborted.");
                return Ok(());
            }
            app.permanently_delete(&id).await?;
            renderer.print_info(&format!("Deleted {id} permanently."));
        }
        Command::Edit { id, title, description, lat, lng } => {
            app.refresh().await?;
            let entry = app
                .store
                .get(&id)
                .ok_or_else(|| anyhow!("no entry {id}"))?;
            let location = match (lat, lng) {
                (Some(lat), Some(lng)) => Some(Point::new(lat, lng)),
                _ => entry.normalized_location(),
            };
            let patch = EntryPatch {
                title: title.unwrap_or_else(|| entry.title.clone()),
                description: description.unwrap_or_else(|| entry.description.clone()),
                location,
            };
            app.update_fields(&id, &patch).await?;
            renderer.print_info(&format!("Updated {id}."));
        }
        Command::Media { action } => match action {
            MediaAction::Add { id, files } => {
                app.refresh().await?;
                let new_refs = app.append_media(&id, &read_uploads(&files)?).await?;
                renderer.print_info(&format!("Uploaded {} media file(s).", new_refs.len()));
            }
            MediaAction::Rm { id, media_id } => {
                app.refresh().await?;
                app.remove_media(&id, &media_id).await?;
                renderer.print_info(&format!("Removed media {media_id}."));
            }
        },
        Command::Avatar { file } => {
            app.bootstrap().await?;
            let upload = MediaUpload::from_path(&file)?;
            let pic = app.upload_avatar(&upload).await?;
            renderer.print_info(&format!("Profile picture updated: {}", app.file_url(&pic)));
        }
        Command::Theme { set } => {
            let prefs = &mut app.session.prefs;
            match set {
                Some(ThemeArg::Dark) => prefs.dark_mode = true,
                Some(ThemeArg::Light) => prefs.dark_mode = false,
                Some(ThemeArg::Toggle) => prefs.dark_mode = !prefs.dark_mode,
                None => {}
            }
            if set.is_some() {
                store.save_prefs(prefs)?;
            }
            let mode = if prefs.dark_mode { "dark" } else { "light" };
            renderer.print_info(&format!("Theme: {mode}."));
        }
    }
    Ok(())
}

fn persist_cookie(app: &Travelog<HttpApi>, store: &SessionStore) -> Result<()> {
    if let Some(cookie) = app.api().cookie() {
        store.save_cookie(cookie)?;
    }
    Ok(())
}

fn read_uploads(paths: &[std::path::PathBuf]) -> Result<Vec<MediaUpload>> {
    paths
        .iter()
        .map(|p| MediaUpload::from_path(p).map_err(Into::into))
        .collect()
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
