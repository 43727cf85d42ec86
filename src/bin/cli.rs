use care_schedule::{
    AgendaEntry, CareSchedule, Category, Recurrence, ScheduleItem, Transition,
    load_schedule_from_csv, load_schedule_from_json, save_schedule_to_csv, save_schedule_to_json,
};
use chrono::{NaiveDate, Weekday};
use std::io::{self, Write};

fn parse_weekday_list(s: &str) -> Result<Vec<Weekday>, String> {
    let mut days = Vec::new();
    for part in s.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        match part.parse::<Weekday>() {
            Ok(day) => days.push(day),
            Err(_) => return Err(format!("invalid weekday '{part}'")),
        }
    }
    Ok(days)
}

fn render_items_as_text_table(items: &[ScheduleItem]) -> String {
    let headers = [
        "id",
        "category",
        "title",
        "time",
        "start",
        "recurrence",
        "days",
        "end",
        "done",
    ];

    let rows: Vec<[String; 9]> = items
        .iter()
        .map(|item| {
            [
                item.id.clone(),
                item.category.as_str().to_string(),
                item.title.clone(),
                item.time.clone(),
                item.start_date.to_string(),
                item.recurrence.as_str().to_string(),
                item.days_of_week
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(","),
                item.end_date.map(|d| d.to_string()).unwrap_or_default(),
                item.completed_dates.len().to_string(),
            ]
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (ci, cell) in row.iter().enumerate() {
            if cell.len() > widths[ci] {
                widths[ci] = cell.len();
            }
        }
    }

    let mut sep = String::new();
    sep.push('+');
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');

    out.push('|');
    for (i, name) in headers.iter().enumerate() {
        out.push(' ');
        out.push_str(name);
        let pad = widths[i] - name.len();
        if pad > 0 {
            out.push_str(&" ".repeat(pad));
        }
        out.push(' ');
        out.push('|');
    }
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');

    for row in &rows {
        out.push('|');
        for (ci, cell) in row.iter().enumerate() {
            out.push(' ');
            out.push_str(cell);
            let pad = widths[ci].saturating_sub(cell.len());
            if pad > 0 {
                out.push_str(&" ".repeat(pad));
            }
            out.push(' ');
            out.push('|');
        }
        out.push('\n');
    }

    out.push_str(&sep);
    out.push('\n');
    out
}

fn render_agenda(entries: &[AgendaEntry]) -> String {
    if entries.is_empty() {
        return "(nothing due)".to_string();
    }
    let mut out = String::new();
    let mut current_date = None;
    for entry in entries {
        if current_date != Some(entry.date) {
            out.push_str(&format!("{}:\n", entry.date));
            current_date = Some(entry.date);
        }
        let mark = if entry.completed { "x" } else { " " };
        out.push_str(&format!(
            "  [{}] {} {} ({}) id={}\n",
            mark,
            entry.time,
            entry.title,
            entry.category.as_str(),
            entry.item_id
        ));
    }
    out
}

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  show                               Show all schedule items\n  add <id> <category> <recurrence[:days]> <YYYY-MM-DD> <HH:MM> <title...>\n                                     Add or replace an item\n                                     (category: medication|care|appointment;\n                                      recurrence: once|daily|weekly:Mon,Fri|monthly)\n  delete <id>                        Delete an item\n  detail <id> <text...>              Set item detail text\n  end <id> <YYYY-MM-DD|none>         Set or clear item end date\n  days <id> <csv>                    Set weekly days (e.g. Mon,Fri)\n  done <id> <YYYY-MM-DD>             Toggle completion for a date\n  agenda <YYYY-MM-DD> [YYYY-MM-DD]   Show due occurrences for a date or range\n  day <YYYY-MM-DD>                   Show completion summary for a date\n  history                            Show completion audit log\n  meta show                          Show patient metadata\n  meta name <text...>                Update patient name\n  meta condition <text...>           Update main condition\n  meta notes <text...>               Update care notes\n  save <json|csv> <path>             Persist schedule to disk\n  load <json|csv> <path>             Load schedule from disk\n  quit|exit                          Exit"
    );
}

fn print_metadata(schedule: &CareSchedule) {
    let metadata = schedule.metadata();
    println!("Patient name   : {}", metadata.patient_name);
    println!("Main condition : {}", metadata.main_condition);
    println!("Care notes     : {}", metadata.care_notes);
}

fn parse_date_arg(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

fn main() {
    let mut schedule = CareSchedule::new();

    println!("Care Schedule (CLI) - type 'help' for commands\n");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        if stdin.read_line(&mut line).is_err() {
            break;
        }
        if line.is_empty() {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => {
                print_help();
            }
            "quit" | "exit" => break,
            "show" => {
                println!("{}", render_items_as_text_table(schedule.items()));
            }
            "add" => {
                let id_s = parts.next();
                let category_s = parts.next();
                let recurrence_s = parts.next();
                let date_s = parts.next();
                let time_s = parts.next();
                let title_parts: Vec<&str> = parts.collect();
                match (id_s, category_s, recurrence_s, date_s, time_s, !title_parts.is_empty()) {
                    (Some(id), Some(category_s), Some(recurrence_s), Some(date_s), Some(time_s), true) => {
                        let category = match Category::from_str(category_s) {
                            Some(c) => c,
                            None => {
                                println!("Invalid category (medication|care|appointment)");
                                continue;
                            }
                        };
                        let (recurrence_name, days_csv) = match recurrence_s.split_once(':') {
                            Some((name, days)) => (name, Some(days)),
                            None => (recurrence_s, None),
                        };
                        let recurrence = match Recurrence::from_str(recurrence_name) {
                            Some(r) => r,
                            None => {
                                println!("Invalid recurrence (once|daily|weekly|monthly)");
                                continue;
                            }
                        };
                        let start_date = match parse_date_arg(date_s) {
                            Some(d) => d,
                            None => {
                                println!("Invalid date (YYYY-MM-DD)");
                                continue;
                            }
                        };
                        let days_of_week = match days_csv.map(parse_weekday_list).transpose() {
                            Ok(days) => days.unwrap_or_default(),
                            Err(message) => {
                                println!("{message}");
                                continue;
                            }
                        };
                        let title = title_parts.join(" ");
                        let mut item =
                            ScheduleItem::new(id, category, title, start_date, time_s, recurrence);
                        item.days_of_week = days_of_week;
                        match schedule.upsert_item(item) {
                            Ok(_) => {
                                println!("Item upserted.");
                                println!("{}", render_items_as_text_table(schedule.items()));
                            }
                            Err(e) => println!("Error: {}", e),
                        }
                    }
                    _ => {
                        println!(
                            "Usage: add <id> <category> <recurrence[:days]> <YYYY-MM-DD> <HH:MM> <title...>"
                        );
                    }
                }
            }
            "delete" => match parts.next() {
                Some(id) => {
                    if schedule.delete_item(id) {
                        println!("Deleted item {id}.");
                        println!("{}", render_items_as_text_table(schedule.items()));
                    } else {
                        println!("Item {id} not found.");
                    }
                }
                None => println!("Usage: delete <id>"),
            },
            "detail" => {
                let id_s = parts.next();
                let rest: Vec<&str> = parts.collect();
                match (id_s, !rest.is_empty()) {
                    (Some(id), true) => match schedule.find_item(id).cloned() {
                        Some(mut item) => {
                            item.detail = Some(rest.join(" "));
                            match schedule.upsert_item(item) {
                                Ok(_) => println!("detail set."),
                                Err(e) => println!("Error: {}", e),
                            }
                        }
                        None => println!("Item {id} not found."),
                    },
                    _ => println!("Usage: detail <id> <text...>"),
                }
            }
            "end" => {
                let id_s = parts.next();
                let date_s = parts.next();
                match (id_s, date_s) {
                    (Some(id), Some(date_s)) => match schedule.find_item(id).cloned() {
                        Some(mut item) => {
                            if date_s.eq_ignore_ascii_case("none") {
                                item.end_date = None;
                            } else {
                                match parse_date_arg(date_s) {
                                    Some(d) => item.end_date = Some(d),
                                    None => {
                                        println!("Invalid date (YYYY-MM-DD or 'none')");
                                        continue;
                                    }
                                }
                            }
                            match schedule.upsert_item(item) {
                                Ok(_) => println!("end date set."),
                                Err(e) => println!("Error: {}", e),
                            }
                        }
                        None => println!("Item {id} not found."),
                    },
                    _ => println!("Usage: end <id> <YYYY-MM-DD|none>"),
                }
            }
            "days" => {
                let id_s = parts.next();
                let csv = parts.next();
                match (id_s, csv) {
                    (Some(id), Some(csv)) => match schedule.find_item(id).cloned() {
                        Some(mut item) => match parse_weekday_list(csv) {
                            Ok(days) => {
                                item.days_of_week = days;
                                match schedule.upsert_item(item) {
                                    Ok(_) => println!("days set."),
                                    Err(e) => println!("Error: {}", e),
                                }
                            }
                            Err(message) => println!("{message}"),
                        },
                        None => println!("Item {id} not found."),
                    },
                    _ => println!("Usage: days <id> <csv>"),
                }
            }
            "done" => {
                let id_s = parts.next();
                let date_s = parts.next();
                match (id_s, date_s) {
                    (Some(id), Some(date_s)) => {
                        let date = match parse_date_arg(date_s) {
                            Some(d) => d,
                            None => {
                                println!("Invalid date (YYYY-MM-DD)");
                                continue;
                            }
                        };
                        match schedule.toggle_completion(id, date) {
                            Some(Transition::Completed) => {
                                println!("Marked {id} completed on {date}.")
                            }
                            Some(Transition::Uncompleted) => {
                                println!("Marked {id} not completed on {date}.")
                            }
                            None => println!("Item {id} not found."),
                        }
                    }
                    _ => println!("Usage: done <id> <YYYY-MM-DD>"),
                }
            }
            "agenda" => {
                let start_s = parts.next();
                let end_s = parts.next();
                match start_s {
                    Some(start_s) => {
                        let start = match parse_date_arg(start_s) {
                            Some(d) => d,
                            None => {
                                println!("Invalid date (YYYY-MM-DD)");
                                continue;
                            }
                        };
                        let end = match end_s {
                            Some(end_s) => match parse_date_arg(end_s) {
                                Some(d) => d,
                                None => {
                                    println!("Invalid end date (YYYY-MM-DD)");
                                    continue;
                                }
                            },
                            None => start,
                        };
                        if end < start {
                            println!("End date must not precede start date.");
                            continue;
                        }
                        println!("{}", render_agenda(&schedule.agenda(start, end)));
                    }
                    None => println!("Usage: agenda <YYYY-MM-DD> [YYYY-MM-DD]"),
                }
            }
            "day" => match parts.next() {
                Some(date_s) => match parse_date_arg(date_s) {
                    Some(date) => {
                        println!("{}", schedule.day_summary(date).to_cli_summary());
                    }
                    None => println!("Invalid date (YYYY-MM-DD)"),
                },
                None => println!("Usage: day <YYYY-MM-DD>"),
            },
            "history" => {
                if schedule.history().is_empty() {
                    println!("(no completions recorded)");
                } else {
                    for record in schedule.history() {
                        println!(
                            "{} | {} ({}) completed for {}",
                            record.recorded_at, record.title, record.item_id, record.date
                        );
                    }
                }
            }
            "meta" => match parts.next() {
                Some("show") | None => print_metadata(&schedule),
                Some("name") => {
                    let rest: Vec<&str> = parts.collect();
                    if rest.is_empty() {
                        println!("Usage: meta name <text...>");
                        continue;
                    }
                    let mut metadata = schedule.metadata().clone();
                    metadata.patient_name = rest.join(" ");
                    schedule.set_metadata(metadata);
                    println!("Patient name updated.");
                    print_metadata(&schedule);
                }
                Some("condition") => {
                    let rest: Vec<&str> = parts.collect();
                    if rest.is_empty() {
                        println!("Usage: meta condition <text...>");
                        continue;
                    }
                    let mut metadata = schedule.metadata().clone();
                    metadata.main_condition = rest.join(" ");
                    schedule.set_metadata(metadata);
                    println!("Main condition updated.");
                    print_metadata(&schedule);
                }
                Some("notes") => {
                    let rest: Vec<&str> = parts.collect();
                    if rest.is_empty() {
                        println!("Usage: meta notes <text...>");
                        continue;
                    }
                    let mut metadata = schedule.metadata().clone();
                    metadata.care_notes = rest.join(" ");
                    schedule.set_metadata(metadata);
                    println!("Care notes updated.");
                    print_metadata(&schedule);
                }
                Some(other) => {
                    println!("Unknown meta command '{}'.", other);
                    println!("Usage: meta show|name|condition|notes ...");
                }
            },
            "save" => {
                let fmt = parts.next();
                let path = parts.next();
                match (fmt, path) {
                    (Some("json"), Some(path)) => match save_schedule_to_json(&schedule, path) {
                        Ok(_) => println!("Schedule saved to {}.", path),
                        Err(e) => println!("Error saving schedule: {}", e),
                    },
                    (Some("csv"), Some(path)) => match save_schedule_to_csv(&schedule, path) {
                        Ok(_) => println!("Schedule saved to {}.", path),
                        Err(e) => println!("Error saving schedule: {}", e),
                    },
                    _ => println!("Usage: save <json|csv> <path>"),
                }
            }
            "load" => {
                let fmt = parts.next();
                let path = parts.next();
                match (fmt, path) {
                    (Some("json"), Some(path)) => match load_schedule_from_json(path) {
                        Ok(loaded) => {
                            schedule = loaded;
                            println!("Schedule loaded from {}.", path);
                            println!("{}", render_items_as_text_table(schedule.items()));
                        }
                        Err(e) => println!("Error loading schedule: {}", e),
                    },
                    (Some("csv"), Some(path)) => match load_schedule_from_csv(path) {
                        Ok(loaded) => {
                            schedule = loaded;
                            println!("Schedule loaded from {}.", path);
                            println!("{}", render_items_as_text_table(schedule.items()));
                        }
                        Err(e) => println!("Error loading schedule: {}", e),
                    },
                    _ => println!("Usage: load <json|csv> <path>"),
                }
            }
            _ => {
                println!("Unknown command. Type 'help'.");
            }
        }
    }
}
