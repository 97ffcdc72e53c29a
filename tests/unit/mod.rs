mod approval;
mod auth;
mod complaint;
mod pagination;
mod vehicle;
