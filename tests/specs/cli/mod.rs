mod help;
mod run;
