//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use serde::Serialize;

use jflix_core::{Director, Genre, Movie, UserRecord};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Check if output is in JSON mode
    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    /// Print a movie list with favorite markers
    pub fn print_movies(&self, movies: &[&Movie], is_favorite: impl Fn(&str) -> bool) {
        match self.format {
            OutputFormat::Human => {
                if movies.is_empty() {
                    println!("No movies found.");
                    return;
                }
                for movie in movies {
                    let marker = if is_favorite(&movie.id) { "♥" } else { " " };
                    println!(
                        "{} {} | {} | {} | {}",
                        marker,
                        movie.id,
                        truncate(&movie.title, 35),
                        movie
                            .year
                            .map(|y| y.to_string())
                            .unwrap_or_else(|| "----".to_string()),
                        truncate(&movie.genre.name, 20)
                    );
                }
                println!("\n{} movie(s)", movies.len());
            }
            OutputFormat::Json => {
                let entries: Vec<_> = movies
                    .iter()
                    .map(|m| {
                        serde_json::json!({
                            "movie": m,
                            "favorite": is_favorite(&m.id)
                        })
                    })
                    .collect();
                print_json(&entries);
            }
            OutputFormat::Quiet => {
                for movie in movies {
                    println!("{}", movie.id);
                }
            }
        }
    }

    /// Print a single movie, including director and synopsis
    pub fn print_movie(&self, movie: &Movie, favorite: Option<bool>) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:          {}", movie.id);
                println!("Title:       {}", movie.title);
                if let Some(year) = movie.year {
                    println!("Year:        {}", year);
                }
                println!("Genre:       {}", movie.genre.name);
                if !movie.director.name.is_empty() {
                    println!("Director:    {}", movie.director.name);
                }
                if let Some(ref image) = movie.image_path {
                    println!("Image:       {}", image);
                }
                if let Some(favorite) = favorite {
                    println!("Favorite:    {}", if favorite { "yes" } else { "no" });
                }
                if let Some(ref description) = movie.description {
                    println!();
                    println!("── Synopsis ──");
                    println!("{}", description);
                }
                if !movie.director.bio.is_empty() {
                    println!();
                    println!("── Director ──");
                    println!("{}", movie.director.bio);
                }
            }
            OutputFormat::Json => print_json(movie),
            OutputFormat::Quiet => println!("{}", movie.id),
        }
    }

    /// Print director details
    pub fn print_director(&self, director: &Director) {
        match self.format {
            OutputFormat::Human => {
                println!("Name:  {}", director.name);
                if let Some(ref birth) = director.birth {
                    println!("Born:  {}", birth);
                }
                if let Some(ref death) = director.death {
                    println!("Died:  {}", death);
                }
                if !director.bio.is_empty() {
                    println!();
                    println!("{}", director.bio);
                }
            }
            OutputFormat::Json => print_json(director),
            OutputFormat::Quiet => println!("{}", director.name),
        }
    }

    /// Print genre details
    pub fn print_genre(&self, genre: &Genre) {
        match self.format {
            OutputFormat::Human => {
                println!("Genre: {}", genre.name);
                if !genre.description.is_empty() {
                    println!();
                    println!("{}", genre.description);
                }
            }
            OutputFormat::Json => print_json(genre),
            OutputFormat::Quiet => println!("{}", genre.name),
        }
    }

    /// Print the user profile
    pub fn print_user(&self, user: &UserRecord) {
        match self.format {
            OutputFormat::Human => {
                println!("Username:  {}", user.username);
                println!("Email:     {}", user.email);
                println!(
                    "Birthday:  {}",
                    user.birthday_date()
                        .unwrap_or_else(|| "(not set)".to_string())
                );
                println!("Favorites: {}", user.favorite_movies.len());
            }
            OutputFormat::Json => print_json(user),
            OutputFormat::Quiet => println!("{}", user.username),
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("Failed to serialize output: {}", e),
    }
}

/// Truncate a string to max characters, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
