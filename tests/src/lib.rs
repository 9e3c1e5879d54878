#[cfg(test)]
mod sweep;
