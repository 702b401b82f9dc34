use crate::cli::parser::{Commands, MemberAction};
use crate::config::Config;
use crate::core::availability::Availability;
use crate::db::log::audit;
use crate::db::members::{insert_member, load_member, load_members, set_availability};
use crate::errors::AppResult;
use crate::models::member::FamilyMember;
use crate::models::wire::SetAvailability;
use crate::ui::messages::success;
use crate::utils::clock::Clock;
use crate::utils::colors::{GREEN, RED, RESET, YELLOW};
use crate::utils::date::parse_epoch;
use crate::utils::format_epoch;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    let Commands::Member { action } = cmd else {
        return Ok(());
    };
    let pool = super::open_pool(cfg)?;

    match action {
        MemberAction::Add { name, role } => {
            let id = insert_member(&pool.conn, &FamilyMember::new(0, name, role))?;
            audit(&pool.conn, "add", &format!("member {}", id), &format!("Added '{}'", name.trim()));
            success(format!("Member '{}' added with id {}", name.trim(), id));
        }

        MemberAction::List => {
            let members = load_members(&pool.conn)?;
            if members.is_empty() {
                println!("No members yet.");
                return Ok(());
            }

            let now = clock.now();
            let mut table = Table::new(vec![
                Column::new("ID", 4),
                Column::new("Name", 16),
                Column::new("Role", 10),
                Column::new("Status", 21),
                Column::new("Away", 35),
            ]);
            for m in &members {
                let status = if Availability::of(m).is_available_at(now) {
                    format!("{GREEN}available{RESET}")
                } else {
                    format!("{RED}away{RESET}")
                };
                let away = match m.window() {
                    Some((since, until)) => {
                        format!("{} → {}", format_epoch(Some(since)), format_epoch(Some(until)))
                    }
                    None if !m.is_available => format!("{YELLOW}until further notice{RESET}"),
                    None => "--".to_string(),
                };
                table.add_row(vec![m.id.to_string(), m.name.clone(), m.role.clone(), status, away]);
            }
            print!("{}", table.render());
        }

        MemberAction::Available { id } => {
            apply(&pool.conn, SetAvailability {
                person_id: *id,
                is_available: true,
                unavailable_since: None,
                unavailable_until: None,
            })?;
        }

        MemberAction::Unavailable { id } => {
            apply(&pool.conn, SetAvailability {
                person_id: *id,
                is_available: false,
                unavailable_since: None,
                unavailable_until: None,
            })?;
        }

        MemberAction::Away { id, from, until } => {
            apply(&pool.conn, SetAvailability {
                person_id: *id,
                is_available: true,
                unavailable_since: Some(parse_epoch(from)?),
                unavailable_until: Some(parse_epoch(until)?),
            })?;
        }
    }

    Ok(())
}

fn apply(conn: &rusqlite::Connection, update: SetAvailability) -> AppResult<()> {
    set_availability(conn, &update)?;
    let member = load_member(conn, update.person_id)?;

    let text = match (update.is_available, member.window()) {
        (false, _) => "unavailable".to_string(),
        (true, Some((since, until))) => format!(
            "away from {} to {}",
            format_epoch(Some(since)),
            format_epoch(Some(until))
        ),
        (true, None) => "available".to_string(),
    };

    audit(conn, "availability", &format!("member {}", member.id), &format!("{} is {}", member.name, text));
    success(format!("{} is now {}", member.name, text));
    Ok(())
}
