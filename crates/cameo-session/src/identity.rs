//! Secret identity selection.

use rand::Rng;

use crate::SessionError;

/// The names players are assigned by default.
pub const CELEBRITIES: [&str; 75] = [
    "Taylor Swift", "Beyoncé", "Drake", "Ariana Grande", "Ed Sheeran",
    "Rihanna", "Justin Bieber", "Lady Gaga", "Kanye West", "Adele",
    "Leonardo DiCaprio", "Brad Pitt", "Jennifer Lawrence", "Tom Cruise", "Scarlett Johansson",
    "Dwayne Johnson", "Will Smith", "Emma Watson", "Robert Downey Jr", "Chris Hemsworth",
    "Kim Kardashian", "Kylie Jenner", "Cristiano Ronaldo", "Lionel Messi", "LeBron James",
    "Serena Williams", "Tom Brady", "Roger Federer", "Usain Bolt", "Michael Jordan",
    "Elon Musk", "Jeff Bezos", "Bill Gates", "Mark Zuckerberg", "Oprah Winfrey",
    "Ellen DeGeneres", "Jimmy Fallon", "Stephen Colbert", "James Corden", "Trevor Noah",
    "Ryan Reynolds", "Ryan Gosling", "Chris Pratt", "Jennifer Aniston", "Angelina Jolie",
    "Johnny Depp", "Morgan Freeman", "Denzel Washington", "Sandra Bullock", "Julia Roberts",
    "Harry Styles", "Billie Eilish", "Post Malone", "The Weeknd", "Bruno Mars",
    "Selena Gomez", "Demi Lovato", "Miley Cyrus", "Katy Perry", "Shakira",
    "David Beckham", "Neymar", "Lewis Hamilton", "Rafael Nadal", "Novak Djokovic",
    "Keanu Reeves", "Nicolas Cage", "Samuel L Jackson", "Meryl Streep", "Tom Hanks",
    "George Clooney", "Matt Damon", "Ben Affleck", "Christian Bale", "Hugh Jackman",
];

/// Hands out secret identities.
///
/// Each call is an independent draw. Nothing stops both players of one
/// session from getting the same name.
pub trait IdentityPool: Send + 'static {
    fn pick(&mut self) -> String;
}

/// A fixed catalog of names, drawn from uniformly.
#[derive(Debug, Clone)]
pub struct CatalogPool {
    names: Vec<String>,
}

impl CatalogPool {
    /// Builds a pool from any list of names.
    ///
    /// # Errors
    /// [`SessionError::CatalogTooSmall`] if fewer than two names are given.
    pub fn new<I, S>(names: I) -> Result<Self, SessionError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.len() < 2 {
            return Err(SessionError::CatalogTooSmall(names.len()));
        }
        Ok(Self { names })
    }

    /// The built-in celebrity catalog.
    pub fn celebrities() -> Self {
        Self {
            names: CELEBRITIES.iter().map(|s| (*s).to_owned()).collect(),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl Default for CatalogPool {
    fn default() -> Self {
        Self::celebrities()
    }
}

impl IdentityPool for CatalogPool {
    fn pick(&mut self) -> String {
        let i = rand::rng().random_range(0..self.names.len());
        self.names[i].clone()
    }
}
