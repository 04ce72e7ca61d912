pub mod confluence;
pub mod feed;
pub mod jira_servicedesk;
pub mod latest;
