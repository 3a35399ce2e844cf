use crate::*;
use std::path::PathBuf;

pub fn handle_runtime_commands(
    cli: &Cli,
    client: &LibraryClient,
    config: &services::config::ConfigFile,
) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Platforms => {
            let platforms = client.list_platforms()?;
            print_out(cli.json, &platforms, |p| {
                format!(
                    "{}\t{}\t{}",
                    p.slug,
                    p.name.as_deref().unwrap_or("n/a"),
                    p.rom_count
                )
            })?;
        }
        Commands::Roms {
            platform,
            search,
            cursor,
            size,
        } => {
            let query = RomListQuery::default()
                .with_cursor(cursor.clone().unwrap_or_default())
                .with_size(*size)
                .with_search_term(search.clone().unwrap_or_default());
            let page = client.list_roms(platform, &query)?;
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&JsonOut {
                        ok: true,
                        data: page
                    })?
                );
            } else {
                for rom in &page.items {
                    println!("{}\t{}\t{} files", rom.id, rom.r_name, rom.files.len());
                }
                println!("total: {}", page.total);
                if let Some(next) = &page.next_cursor {
                    println!("next cursor: {next}");
                }
            }
        }
        Commands::Show { platform, rom_id } => {
            let rom = client.get_rom(platform, *rom_id)?;
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&JsonOut {
                        ok: true,
                        data: rom
                    })?
                );
            } else {
                println!("platform: {}", rom.p_slug);
                println!("id: {}", rom.id);
                println!("name: {}", rom.r_name);
                if let Some(igdb) = rom.igdb_id {
                    println!("igdb: {igdb}");
                }
                if let Some(summary) = &rom.summary {
                    println!("summary: {summary}");
                }
                if !rom.files.is_empty() {
                    println!("files: {}", rom.files.join(", "));
                }
            }
        }
        Commands::Download {
            platform,
            rom_id,
            files,
            output,
        } => {
            let rom = client.get_rom(platform, *rom_id)?;
            let dir = output
                .clone()
                .or_else(|| config.general.download_dir.clone())
                .unwrap_or_else(|| PathBuf::from("."));
            let explicit = (!files.is_empty()).then_some(files.as_slice());
            let report = services::download::download_to_dir(client, &rom, explicit, &dir)?;
            print_one(cli.json, report, |r| {
                format!("saved {} ({} bytes)", r.path, r.bytes)
            })?;
        }
        Commands::Update {
            platform,
            rom_id,
            name,
            summary,
            igdb_id,
        } => {
            let patch = RomPatch {
                r_name: name.clone(),
                summary: summary.clone(),
                igdb_id: *igdb_id,
            };
            if patch.is_empty() {
                anyhow::bail!("nothing to update: pass --name, --summary, or --igdb-id");
            }
            let updated = client.update_rom(platform, *rom_id, &patch)?;
            print_one(cli.json, updated, |r| format!("updated {}\t{}", r.id, r.r_name))?;
        }
        Commands::Delete {
            platform,
            rom_id,
            filesystem,
        } => {
            let status = client.delete_rom(platform, *rom_id, *filesystem)?;
            print_one(cli.json, status, |s| s.msg.clone())?;
        }
        Commands::Match {
            platform,
            rom_id,
            term,
            by,
        } => {
            let rom = client.get_rom(platform, *rom_id)?;
            let search_term = term.clone().unwrap_or_else(|| rom.r_name.clone());
            let matches = client.match_metadata(&search_term, *by, &rom)?;
            let report = MatchReport {
                search_term,
                search_by: *by,
                matches,
            };
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&JsonOut {
                        ok: true,
                        data: report
                    })?
                );
            } else {
                for m in &report.matches {
                    println!("{}\t{}\t{}", m.igdb_id, m.slug, m.name);
                }
            }
        }
    }

    Ok(())
}
