pub mod agent;
#[cfg(test)]
pub mod mock_agent;
