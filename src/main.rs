use chrono::{Datelike, NaiveDate};
use clap::Parser;
use dulich::application::{
    init, ConfigService, DestinationService, StatisticsService, TripDetails, TripPlanner,
    TripService,
};
use dulich::cli::output::{
    format_budget, format_destination, format_destination_list, format_save_outcome,
    format_stats, format_trip, format_trip_list,
};
use dulich::cli::{Cli, Commands, DestinationCommand, DestinationFields, TripCommand};
use dulich::domain::{DestinationDraft, DestinationFilter, DestinationType, SortOrder};
use dulich::error::DulichError;
use dulich::infrastructure::logging::init_logging;
use dulich::infrastructure::{Backend, Config, Stores};
use std::path::Path;
use std::str::FromStr;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    match run(cli).await {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

async fn run(cli: Cli) -> Result<(), DulichError> {
    let config_path = Config::resolve_path(cli.config.as_deref());

    match cli.command {
        Some(Commands::Init { backend, data_file }) => {
            let backend = Backend::from_str(&backend).map_err(DulichError::Config)?;
            init::init(&config_path, backend, data_file)?;
            Ok(())
        }
        Some(Commands::Config { key, value, list }) => {
            let service = ConfigService::new(config_path);

            if list {
                for (key, value) in service.list()? {
                    println!("{} = {}", key, value);
                }
                Ok(())
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                } else {
                    println!("{}", service.get(&k)?);
                }
                Ok(())
            } else {
                println!("Usage: dulich config [--list | <key> [<value>]]");
                println!(
                    "Valid keys: {}",
                    dulich::infrastructure::config::CONFIG_KEYS.join(", ")
                );
                Ok(())
            }
        }
        Some(Commands::Destination(command)) => {
            let stores = open_stores(&config_path)?;
            run_destination(command, &stores).await
        }
        Some(Commands::Trip(command)) => {
            let stores = open_stores(&config_path)?;
            run_trip(command, &stores).await
        }
        Some(Commands::Stats { year }) => {
            let stores = open_stores(&config_path)?;
            let year = year.unwrap_or_else(|| chrono::Local::now().year());
            let report = StatisticsService::new(&stores).report(year).await?;
            print!("{}", format_stats(&report));
            Ok(())
        }
        None => {
            println!("dulich - Travel planner for Vietnamese destinations");
            println!("Use --help for usage information");
            Ok(())
        }
    }
}

fn open_stores(config_path: &Path) -> Result<Stores, DulichError> {
    let config = Config::load(config_path)?;
    Stores::open(&config, config_path)
}

fn parse_date(value: &str) -> Result<NaiveDate, DulichError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| DulichError::Validation(format!("Invalid date format: '{}'", value)))
}

fn parse_kind(value: &str) -> Result<DestinationType, DulichError> {
    DestinationType::from_str(value).map_err(DulichError::Validation)
}

async fn run_destination(command: DestinationCommand, stores: &Stores) -> Result<(), DulichError> {
    let service = DestinationService::new(stores);

    match command {
        DestinationCommand::List {
            kind,
            max_price,
            min_rating,
            sort,
        } => {
            let filter = DestinationFilter {
                kind: kind.as_deref().map(parse_kind).transpose()?,
                max_price,
                min_rating,
                sort: sort
                    .as_deref()
                    .map(SortOrder::from_str)
                    .transpose()
                    .map_err(DulichError::Validation)?,
            };
            let destinations = service.list(&filter).await?;
            println!("{}", format_destination_list(&destinations).trim_end());
        }
        DestinationCommand::Show { id } => {
            print!("{}", format_destination(&service.get(&id).await?));
        }
        DestinationCommand::Add(fields) => {
            let draft = new_destination(fields)?;
            let created = service.create(&draft).await?;
            println!("Created destination {} ({})", created.id, created.name);
        }
        DestinationCommand::Update { id, fields } => {
            let mut draft = service.get(&id).await?.to_draft();
            apply_fields(&mut draft, fields)?;
            let updated = service.update(&id, &draft).await?;
            println!("Updated destination {} ({})", updated.id, updated.name);
        }
        DestinationCommand::Delete { id } => {
            service.delete(&id).await?;
            println!("Deleted destination {}", id);
        }
    }
    Ok(())
}

fn new_destination(fields: DestinationFields) -> Result<DestinationDraft, DulichError> {
    let required = |value: Option<String>, flag: &str| {
        value.ok_or_else(|| DulichError::Validation(format!("--{} is required", flag)))
    };

    let mut draft = DestinationDraft {
        name: required(fields.name.clone(), "name")?,
        description: String::new(),
        location: required(fields.location.clone(), "location")?,
        kind: parse_kind(&required(fields.kind.clone(), "type")?)?,
        image_url: String::new(),
        visit_duration: fields
            .hours
            .ok_or_else(|| DulichError::Validation("--hours is required".to_string()))?,
        average_rating: 0.0,
        food_cost: 0.0,
        accommodation_cost: 0.0,
        transportation_cost: 0.0,
    };
    apply_fields(&mut draft, fields)?;
    Ok(draft)
}

fn apply_fields(draft: &mut DestinationDraft, fields: DestinationFields) -> Result<(), DulichError> {
    if let Some(name) = fields.name {
        draft.name = name;
    }
    if let Some(location) = fields.location {
        draft.location = location;
    }
    if let Some(kind) = fields.kind {
        draft.kind = parse_kind(&kind)?;
    }
    if let Some(description) = fields.description {
        draft.description = description;
    }
    if let Some(image_url) = fields.image_url {
        draft.image_url = image_url;
    }
    if let Some(hours) = fields.hours {
        draft.visit_duration = hours;
    }
    if let Some(rating) = fields.rating {
        draft.average_rating = rating;
    }
    if let Some(food) = fields.food {
        draft.food_cost = food;
    }
    if let Some(stay) = fields.stay {
        draft.accommodation_cost = stay;
    }
    if let Some(transport) = fields.transport {
        draft.transportation_cost = transport;
    }
    Ok(())
}

/// Planner holding the current destinations and the stored trip `id`
async fn open_trip(
    stores: &Stores,
    service: &TripService,
    id: &str,
) -> Result<TripPlanner, DulichError> {
    let mut planner = TripPlanner::new();
    planner
        .refresh_destinations(stores.destinations.as_ref())
        .await?;
    service.load(&mut planner, id).await?;
    Ok(planner)
}

async fn run_trip(command: TripCommand, stores: &Stores) -> Result<(), DulichError> {
    let service = TripService::new(stores);

    match command {
        TripCommand::List => {
            let trips = service.list().await?;
            println!("{}", format_trip_list(&trips).trim_end());
        }
        TripCommand::Create {
            name,
            start,
            end,
            limit,
        } => {
            let mut planner = TripPlanner::new();
            planner.set_details(TripDetails {
                name,
                start_date: parse_date(&start)?,
                end_date: parse_date(&end)?,
            })?;
            if let Some(limit) = limit {
                planner.set_budget_limit(limit)?;
            }
            let outcome = service.save(&mut planner).await?;
            println!("{}", format_save_outcome(&outcome));
        }
        TripCommand::Update {
            id,
            name,
            start,
            end,
        } => {
            let mut planner = open_trip(stores, &service, &id).await?;
            let mut details = planner
                .details()
                .cloned()
                .ok_or(DulichError::NoCurrentItinerary)?;
            if let Some(name) = name {
                details.name = name;
            }
            if let Some(start) = start {
                details.start_date = parse_date(&start)?;
            }
            if let Some(end) = end {
                details.end_date = parse_date(&end)?;
            }
            planner.set_details(details)?;
            let outcome = service.save(&mut planner).await?;
            println!("{}", format_save_outcome(&outcome));
        }
        TripCommand::Show { id } => {
            let planner = open_trip(stores, &service, &id).await?;
            print!("{}", format_trip(&planner));
            println!();
            print!("{}", format_budget(&planner));
        }
        TripCommand::Add {
            trip,
            destination,
            day,
            order,
        } => {
            let mut planner = open_trip(stores, &service, &trip).await?;
            match order {
                Some(order) => planner.add_destination(&destination, day, order)?,
                None => planner.append_destination(&destination, day)?,
            }
            let outcome = service.save(&mut planner).await?;
            print!("{}", format_trip(&planner));
            println!("{}", format_save_outcome(&outcome));
        }
        TripCommand::Remove {
            trip,
            destination,
            day,
        } => {
            let mut planner = open_trip(stores, &service, &trip).await?;
            planner.remove_destination(&destination, day);
            let outcome = service.save(&mut planner).await?;
            print!("{}", format_trip(&planner));
            println!("{}", format_save_outcome(&outcome));
        }
        TripCommand::Move {
            trip,
            from_day,
            from_order,
            to_day,
            to_index,
        } => {
            let mut planner = open_trip(stores, &service, &trip).await?;
            planner.reorder(from_day, from_order, to_day, to_index)?;
            let outcome = service.save(&mut planner).await?;
            print!("{}", format_trip(&planner));
            println!("{}", format_save_outcome(&outcome));
        }
        TripCommand::Budget { id, limit } => {
            let mut planner = open_trip(stores, &service, &id).await?;
            if let Some(limit) = limit {
                planner.set_budget_limit(limit)?;
            }
            let budget_id = service.save_budget(&mut planner).await?;
            print!("{}", format_budget(&planner));
            println!("Saved budget {}", budget_id);
        }
        TripCommand::Delete { id } => {
            service.delete(&mut TripPlanner::new(), &id).await?;
            println!("Deleted trip {}", id);
        }
    }
    Ok(())
}
