
mod withdraw;
