//! Binary-local command handlers.
//!
//! Each subcommand drives a [`Session`] the way an interactive front end
//! would: point a pane at the location, select the entry, then invoke the
//! operation.

use std::sync::Arc;

use droidpane::bridge::{AdbBridge, DeviceEvent, DeviceWatcher, RemoteShellBridge};
use droidpane::config::{initialize_default_global_config, Config, GlobalConfigInitResult};
use droidpane::render::{format_size, RenderSink};
use droidpane::session::{Session, Side, ViewContent};

use crate::cli::{Command, Location};

pub(crate) fn run_init(renderer: &dyn RenderSink, force: bool) -> Result<(), String> {
    match initialize_default_global_config(force).map_err(|e| e.to_string())? {
        GlobalConfigInitResult::Created { path } => {
            renderer.activity(&format!("wrote {}", path.display()));
        }
        GlobalConfigInitResult::AlreadyInitialized { path } => {
            renderer.warn(&format!(
                "{} already exists; pass --force to overwrite",
                path.display()
            ));
        }
        GlobalConfigInitResult::Overwritten { path, backup_path } => {
            renderer.activity(&format!("wrote {}", path.display()));
            renderer.field("backup", &backup_path.display().to_string());
        }
    }
    Ok(())
}

pub(crate) async fn run(
    renderer: &dyn RenderSink,
    config: &Config,
    command: Command,
) -> Result<(), String> {
    let bridge: Arc<dyn RemoteShellBridge> = Arc::new(AdbBridge::from_config(&config.bridge));
    let mut session = Session::new(config, bridge.clone());

    match command {
        Command::Init { force } => run_init(renderer, force),
        Command::Devices { json } => {
            let devices = bridge.list_devices().await;
            if json {
                println!("{}", to_json(&devices)?);
            } else {
                renderer.devices(&devices);
            }
            Ok(())
        }
        Command::Watch => watch(renderer, &config.bridge.program, bridge.as_ref()).await,
        Command::Ls { location, json } => {
            let entries = session
                .show(Side::Left, &location.binding, &location.path)
                .await
                .map_err(|e| e.to_string())?;
            if json {
                println!("{}", to_json(entries)?);
            } else {
                renderer.listing(entries);
            }
            Ok(())
        }
        Command::Du { location } => {
            focus(&mut session, Side::Left, &location).await?;
            let bytes = session
                .compute_directory_size()
                .await
                .map_err(|e| e.to_string())?;
            println!("{bytes}\t{}", format_size(bytes));
            Ok(())
        }
        Command::Cat { location } => {
            focus(&mut session, Side::Left, &location).await?;
            match session.read_for_view(false).await.map_err(|e| e.to_string())? {
                ViewContent::Text(text) => {
                    renderer.content(&text);
                    Ok(())
                }
                ViewContent::Binary { name } => Err(format!(
                    "{name} is a binary file; use `droidpane open` instead"
                )),
            }
        }
        Command::Edit {
            location,
            from_file,
        } => {
            let content = tokio::fs::read_to_string(&from_file)
                .await
                .map_err(|e| format!("{from_file}: {e}"))?;
            focus(&mut session, Side::Left, &location).await?;
            if let ViewContent::Binary { name } =
                session.read_for_view(true).await.map_err(|e| e.to_string())?
            {
                return Err(format!("{name} is a binary file and cannot be edited"));
            }
            let saved = session.write_from_edit(&content).await;
            session.close_editor();
            saved.map_err(|e| e.to_string())?;
            renderer.activity(&format!("saved {}", location.path));
            Ok(())
        }
        Command::Rm { location } => {
            focus(&mut session, Side::Left, &location).await?;
            session.delete().await.map_err(|e| e.to_string())?;
            renderer.activity(&format!("deleted {}", location.path));
            Ok(())
        }
        Command::Mv { location, new_name } => {
            focus(&mut session, Side::Left, &location).await?;
            session.rename(&new_name).await.map_err(|e| e.to_string())?;
            renderer.activity(&format!("renamed {} to {new_name}", location.path));
            Ok(())
        }
        Command::Cp { source, dest_dir } => {
            session
                .show(Side::Right, &dest_dir.binding, &dest_dir.path)
                .await
                .map_err(|e| e.to_string())?;
            focus(&mut session, Side::Left, &source).await?;
            session.transfer().await.map_err(|e| e.to_string())?;
            renderer.activity(&format!(
                "copied {} to {}",
                source.path,
                session.pane(Side::Right).path()
            ));
            Ok(())
        }
        Command::Open { location } => {
            focus(&mut session, Side::Left, &location).await?;
            let opened = session.open_external().await.map_err(|e| e.to_string())?;
            renderer.field("opened", &opened.display().to_string());
            Ok(())
        }
    }
}

async fn focus(session: &mut Session, side: Side, location: &Location) -> Result<(), String> {
    session
        .focus(side, &location.binding, &location.path)
        .await
        .map(|_| ())
        .map_err(|e| format!("{}: {e}", location.path))
}

/// Print the device list at start and after every change until the tracker
/// exits or the user interrupts.
async fn watch(
    renderer: &dyn RenderSink,
    program: &str,
    bridge: &dyn RemoteShellBridge,
) -> Result<(), String> {
    let (_watcher, mut events) = DeviceWatcher::spawn(program).map_err(|e| e.to_string())?;
    renderer.section("devices");
    renderer.devices(&bridge.list_devices().await);
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => return Ok(()),
            event = events.recv() => match event {
                Some(DeviceEvent::ListChanged) => {
                    renderer.section("devices changed");
                    renderer.devices(&bridge.list_devices().await);
                }
                Some(DeviceEvent::WatcherStopped { code }) => {
                    return Err(match code {
                        Some(code) => format!("device tracker exited with code {code}"),
                        None => "device tracker exited".to_string(),
                    });
                }
                None => return Ok(()),
            },
        }
    }
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| e.to_string())
}
