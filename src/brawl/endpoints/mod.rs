mod battlelog;
mod brawlers;
mod players;
