//! Line-oriented front end: command parsing, dispatch and text rendering.

use std::str::FromStr;

use thiserror::Error;

use crate::domain::dates;
use crate::domain::employee::{Employee, EmployeeWithReports};
use crate::domain::query::PAGE_SIZE_OPTIONS;
use crate::domain::types::{EmployeeId, Position};
use crate::dto::directory::DirectoryView;
use crate::dto::employee::EmployeeEditData;
use crate::forms::date_range::DateRangeForm;
use crate::forms::direct_reports::DirectReportsForm;
use crate::forms::employee::EmployeeForm;
use crate::repository::{EmployeeReader, EmployeeWriter};
use crate::services::coordinator::SearchCoordinator;
use crate::services::{ServiceResult, employees};

/// Command reference printed at startup and by `help`.
pub fn help() -> String {
    let sizes = PAGE_SIZE_OPTIONS.map(|size| size.to_string()).join(", ");
    format!(
        "\
Commands:
  name <text>                               search by name (empty clears)
  position <name|all>                       filter by position
  page <n>                                  go to page n
  size <n>                                  employees per page ({sizes})
  filter <YYYY-MM-DD> <YYYY-MM-DD>          employees hired in the range
  clear                                     drop every filter
  show <id>                                 employee details
  add <name>; <position>; <YYYY-MM-DD>      add an employee
  edit <id>                                 current values and report candidates
  edit <id> <name>; <position>; <YYYY-MM-DD>
  promote <id> <position>
  reports <id> <id,id,...>                  replace direct reports
  deactivate <id>
  help
  quit"
    )
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command `{0}`, type `help` for the list")]
    Unknown(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
    #[error("`{0}` is not a valid employee id")]
    InvalidId(String),
    #[error("`{0}` is not a number")]
    InvalidNumber(String),
    #[error("Unknown position `{0}`, expected one of: {positions}", positions = position_names())]
    InvalidPosition(String),
}

fn position_names() -> String {
    Position::ALL
        .into_iter()
        .map(Position::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Name(String),
    Position(Option<Position>),
    /// One-based.
    Page(u32),
    Size(u32),
    Filter(DateRangeForm),
    Clear,
    Show(EmployeeId),
    /// Edit view: stored values and report candidates.
    Editor(EmployeeId),
    Add(EmployeeForm),
    Edit(EmployeeId, EmployeeForm),
    Promote(EmployeeId, Position),
    Reports(DirectReportsForm),
    Deactivate(EmployeeId),
    Help,
    Quit,
}

fn parse_id(raw: &str) -> Result<EmployeeId, CommandError> {
    raw.parse()
        .map_err(|_| CommandError::InvalidId(raw.to_string()))
}

fn parse_number(raw: &str) -> Result<u32, CommandError> {
    raw.trim()
        .parse()
        .map_err(|_| CommandError::InvalidNumber(raw.to_string()))
}

fn parse_position(raw: &str) -> Result<Position, CommandError> {
    raw.parse()
        .map_err(|_| CommandError::InvalidPosition(raw.trim().to_string()))
}

/// Splits `<name>; <position>; <date>` into an unvalidated form.
fn parse_employee_form(raw: &str, usage: &'static str) -> Result<EmployeeForm, CommandError> {
    let parts: Vec<&str> = raw.split(';').map(str::trim).collect();
    let [name, position, hire_date] = parts.as_slice() else {
        return Err(CommandError::Usage(usage));
    };
    Ok(EmployeeForm {
        name: name.to_string(),
        position: position.to_string(),
        hire_date: hire_date.to_string(),
    })
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (keyword, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        match keyword.to_lowercase().as_str() {
            "name" => Ok(Command::Name(rest.to_string())),
            "position" => match rest {
                "" => Err(CommandError::Usage("position <name|all>")),
                all if all.eq_ignore_ascii_case("all") => Ok(Command::Position(None)),
                name => parse_position(name).map(|position| Command::Position(Some(position))),
            },
            "page" => match parse_number(rest)? {
                0 => Err(CommandError::Usage("page <n>, pages start at 1")),
                page => Ok(Command::Page(page)),
            },
            "size" => Ok(Command::Size(parse_number(rest)?)),
            "filter" => {
                let mut bounds = rest.split_whitespace();
                match (bounds.next(), bounds.next(), bounds.next()) {
                    (Some(start), Some(end), None) => Ok(Command::Filter(DateRangeForm {
                        start_date: start.to_string(),
                        end_date: end.to_string(),
                    })),
                    _ => Err(CommandError::Usage("filter <YYYY-MM-DD> <YYYY-MM-DD>")),
                }
            }
            "clear" => Ok(Command::Clear),
            "show" => Ok(Command::Show(parse_id(rest)?)),
            "add" => parse_employee_form(rest, "add <name>; <position>; <YYYY-MM-DD>")
                .map(Command::Add),
            "edit" => {
                const USAGE: &str = "edit <id> <name>; <position>; <YYYY-MM-DD>";
                match rest.split_once(char::is_whitespace) {
                    Some((id, form)) => {
                        Ok(Command::Edit(parse_id(id)?, parse_employee_form(form, USAGE)?))
                    }
                    None if rest.is_empty() => Err(CommandError::Usage(USAGE)),
                    None => Ok(Command::Editor(parse_id(rest)?)),
                }
            }
            "promote" => {
                let (id, position) = rest
                    .split_once(char::is_whitespace)
                    .ok_or(CommandError::Usage("promote <id> <position>"))?;
                Ok(Command::Promote(parse_id(id)?, parse_position(position)?))
            }
            "reports" => {
                let (id, list) = rest
                    .split_once(char::is_whitespace)
                    .unwrap_or((rest, ""));
                if id.is_empty() {
                    return Err(CommandError::Usage("reports <id> <id,id,...>"));
                }
                let employee_id = parse_id(id)?;
                let reports = list
                    .split(',')
                    .map(str::trim)
                    .filter(|raw| !raw.is_empty())
                    .map(|raw| parse_id(raw).map(i32::from))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Command::Reports(DirectReportsForm {
                    employee_id: employee_id.get(),
                    reports,
                }))
            }
            "deactivate" => Ok(Command::Deactivate(parse_id(rest)?)),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            _ => Err(CommandError::Unknown(keyword.to_string())),
        }
    }
}

/// Runs one command. Listing changes are published through the coordinator;
/// the returned text, if any, is printed as the direct answer.
pub async fn execute<R>(
    coordinator: &SearchCoordinator<R>,
    command: Command,
) -> ServiceResult<Option<String>>
where
    R: EmployeeReader + EmployeeWriter + ?Sized + 'static,
{
    match command {
        Command::Name(name) => {
            coordinator.set_name(name)?;
            Ok(None)
        }
        Command::Position(position) => {
            coordinator.set_position(position).await?;
            Ok(None)
        }
        Command::Page(page) => {
            coordinator.go_to_page(page.saturating_sub(1)).await?;
            Ok(None)
        }
        Command::Size(size) => {
            coordinator.set_page_size(size).await?;
            Ok(None)
        }
        Command::Filter(form) => {
            coordinator.apply_date_filter(form).await?;
            Ok(None)
        }
        Command::Clear => {
            coordinator.clear_filters().await?;
            Ok(None)
        }
        Command::Show(id) => {
            let details =
                employees::load_employee_details(coordinator.repository().as_ref(), id).await?;
            Ok(Some(render_details(&details)))
        }
        Command::Editor(id) => {
            let editor =
                employees::load_employee_editor(coordinator.repository().as_ref(), id).await?;
            Ok(Some(render_editor(&editor)))
        }
        Command::Add(form) => {
            let created = employees::create_employee(coordinator, form).await?;
            Ok(Some(format!("Added {}", render_employee(&created))))
        }
        Command::Edit(id, form) => {
            let saved = employees::update_employee(coordinator, id, form).await?;
            Ok(Some(format!("Saved {}", render_employee(&saved))))
        }
        Command::Promote(id, position) => {
            let employee = employees::update_position(coordinator, id, position).await?;
            Ok(Some(format!("{} is now {}", employee.name, employee.position)))
        }
        Command::Reports(form) => {
            let employee = employees::update_direct_reports(coordinator, form).await?;
            Ok(Some(format!(
                "{} has {} direct reports",
                employee.name,
                employee.direct_reports.len()
            )))
        }
        Command::Deactivate(id) => {
            let employee = employees::deactivate_employee(coordinator, id).await?;
            Ok(Some(format!("Deactivated {}", employee.name)))
        }
        Command::Help => Ok(Some(help())),
        Command::Quit => Ok(None),
    }
}

pub fn render_employee(employee: &Employee) -> String {
    format!(
        "#{} {} ({}), hired {}{}",
        employee.id,
        employee.name,
        employee.position,
        dates::to_wire(employee.hire_date),
        if employee.active { "" } else { ", inactive" }
    )
}

pub fn render_details(details: &EmployeeWithReports) -> String {
    let mut out = render_employee(&details.employee);
    if details.direct_report_names.is_empty() {
        out.push_str("\n  no direct reports");
    } else {
        out.push_str(&format!(
            "\n  direct reports: {}",
            details.direct_report_names.join(", ")
        ));
    }
    out
}

/// Details followed by a prefilled `edit` line and the report candidates.
pub fn render_editor(editor: &EmployeeEditData) -> String {
    let mut out = render_details(&editor.details);
    let form = &editor.form;
    out.push_str(&format!(
        "\n  edit {} {}; {}; {}",
        editor.details.employee.id, form.name, form.position, form.hire_date
    ));

    let candidates: Vec<String> = editor
        .report_candidates
        .iter()
        .map(|employee| format!("#{} {}", employee.id, employee.name))
        .collect();
    if candidates.is_empty() {
        out.push_str("\n  no report candidates");
    } else {
        out.push_str(&format!("\n  report candidates: {}", candidates.join(", ")));
    }
    out
}

/// Renders the listing table followed by the pagination strip.
pub fn render_view(view: &DirectoryView) -> String {
    let mut out = String::new();

    let query = &view.query;
    let mut filters = Vec::new();
    if let Some(name) = query.name_filter() {
        filters.push(format!("name \"{name}\""));
    }
    if let Some(position) = query.position {
        filters.push(format!("position {position}"));
    }
    if let Some(range) = query.date_range {
        filters.push(format!(
            "hired {} - {}",
            dates::to_wire(range.start()),
            dates::to_wire(range.end())
        ));
    }
    if !filters.is_empty() {
        out.push_str(&format!("Filters: {}\n", filters.join(", ")));
    }

    if view.is_empty() {
        out.push_str("No employees found\n");
    }
    for employee in &view.employees {
        out.push_str(&format!("  {}\n", render_employee(employee)));
    }

    match &view.pagination {
        Some(pagination) if pagination.total_pages > 0 => {
            let current = pagination.page_number + 1;
            let links: Vec<String> = pagination
                .links
                .iter()
                .map(|link| match link {
                    Some(page) if *page == current => format!("[{page}]"),
                    Some(page) => page.to_string(),
                    None => "...".to_string(),
                })
                .collect();
            out.push_str(&format!(
                "Page {current} of {} ({} employees): {}\n",
                pagination.total_pages,
                pagination.total_elements,
                links.join(" ")
            ));
        }
        Some(_) => {}
        None => {
            out.push_str(&format!(
                "{} employees hired in range\n",
                view.employees.len()
            ));
        }
    }

    if let Some(error) = &view.error {
        out.push_str(&format!("! {error}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::query::{DateRange, SearchQuery};
    use crate::pagination::Page;
    use crate::services::cache::{Listing, ResultCache};

    fn id(value: i32) -> EmployeeId {
        EmployeeId::new(value).unwrap()
    }

    fn employee(value: i32, name: &str) -> Employee {
        Employee {
            id: id(value),
            name: name.to_string(),
            position: Position::Engineer,
            active: true,
            direct_reports: Default::default(),
            hire_date: NaiveDate::from_ymd_opt(2023, 2, 1).unwrap(),
        }
    }

    #[test]
    fn parses_filter_commands() {
        assert_eq!("name  Ali ".parse(), Ok(Command::Name("Ali".into())));
        assert_eq!("name".parse(), Ok(Command::Name(String::new())));
        assert_eq!(
            "position engineer".parse(),
            Ok(Command::Position(Some(Position::Engineer)))
        );
        assert_eq!("position ALL".parse(), Ok(Command::Position(None)));
        assert_eq!("page 3".parse(), Ok(Command::Page(3)));
        assert_eq!("SIZE 10".parse(), Ok(Command::Size(10)));
        assert_eq!(
            "filter 2023-01-01 2023-12-31".parse(),
            Ok(Command::Filter(DateRangeForm {
                start_date: "2023-01-01".into(),
                end_date: "2023-12-31".into(),
            }))
        );
        assert_eq!("clear".parse(), Ok(Command::Clear));
    }

    #[test]
    fn rejects_malformed_filters() {
        assert!(matches!(
            "page 0".parse::<Command>(),
            Err(CommandError::Usage(_))
        ));
        assert_eq!(
            "size ten".parse::<Command>(),
            Err(CommandError::InvalidNumber("ten".into()))
        );
        assert!(matches!(
            "filter 2023-01-01".parse::<Command>(),
            Err(CommandError::Usage(_))
        ));
        assert!(matches!(
            "position janitor".parse::<Command>(),
            Err(CommandError::InvalidPosition(_))
        ));
        assert_eq!(
            "launch".parse::<Command>(),
            Err(CommandError::Unknown("launch".into()))
        );
    }

    #[test]
    fn parses_mutation_commands() {
        assert_eq!(
            "add Jane Doe; Engineer; 2023-02-01".parse(),
            Ok(Command::Add(EmployeeForm {
                name: "Jane Doe".into(),
                position: "Engineer".into(),
                hire_date: "2023-02-01".into(),
            }))
        );
        assert_eq!(
            "edit 42 Jane Roe; CTO; 2020-05-05".parse(),
            Ok(Command::Edit(
                id(42),
                EmployeeForm {
                    name: "Jane Roe".into(),
                    position: "CTO".into(),
                    hire_date: "2020-05-05".into(),
                }
            ))
        );
        assert_eq!(
            "promote 42 hr".parse(),
            Ok(Command::Promote(id(42), Position::Hr))
        );
        assert_eq!(
            "reports 42 7, 9,7".parse(),
            Ok(Command::Reports(DirectReportsForm {
                employee_id: 42,
                reports: vec![7, 9, 7],
            }))
        );
        assert_eq!(
            "reports 42".parse(),
            Ok(Command::Reports(DirectReportsForm {
                employee_id: 42,
                reports: vec![],
            }))
        );
        assert_eq!("deactivate 42".parse(), Ok(Command::Deactivate(id(42))));
        assert_eq!("show 7".parse(), Ok(Command::Show(id(7))));
        assert_eq!("edit 7".parse(), Ok(Command::Editor(id(7))));
    }

    #[test]
    fn help_lists_page_sizes() {
        assert!(help().contains("employees per page (5, 10, 25, 50)"));
    }

    #[test]
    fn rejects_malformed_mutations() {
        assert!(matches!(
            "add Jane; Engineer".parse::<Command>(),
            Err(CommandError::Usage(_))
        ));
        assert!(matches!(
            "edit".parse::<Command>(),
            Err(CommandError::Usage(_))
        ));
        assert_eq!(
            "deactivate -1".parse::<Command>(),
            Err(CommandError::InvalidId("-1".into()))
        );
        assert_eq!(
            "reports 42 7,x".parse::<Command>(),
            Err(CommandError::InvalidId("x".into()))
        );
    }

    #[test]
    fn renders_paged_listing_with_links() {
        let mut query = SearchQuery::new(5);
        query.name = "Jane".into();
        let mut cache = ResultCache::new(5);
        cache.replace(
            Listing::Paged(Page::new(vec![employee(1, "Jane Doe")], 1, 5, 12)),
            3,
        );

        let rendered = render_view(&DirectoryView::new(query, &cache));

        assert!(rendered.contains("Filters: name \"Jane\""));
        assert!(rendered.contains("#1 Jane Doe (Engineer), hired 02/01/2023"));
        assert!(rendered.contains("Page 2 of 3 (12 employees): 1 [2] 3"));
    }

    #[test]
    fn renders_date_range_listing_and_error() {
        let mut query = SearchQuery::new(5);
        query.date_range = Some(
            DateRange::new(
                NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
            )
            .unwrap(),
        );
        let mut cache = ResultCache::new(5);
        cache.replace(Listing::Unpaged(vec![employee(1, "A"), employee(2, "B")]), 1);
        cache.record_error("Failed to fetch employees. Please try again.");

        let rendered = render_view(&DirectoryView::new(query, &cache));

        assert!(rendered.contains("hired 01/01/2023 - 12/31/2023"));
        assert!(rendered.contains("2 employees hired in range"));
        assert!(rendered.contains("! Failed to fetch employees"));
    }

    #[test]
    fn renders_details_with_reports() {
        let details = EmployeeWithReports {
            employee: employee(42, "Boss"),
            direct_report_names: vec!["Ann".into(), "Bob".into()],
        };
        assert_eq!(
            render_details(&details),
            "#42 Boss (Engineer), hired 02/01/2023\n  direct reports: Ann, Bob"
        );
    }
}
