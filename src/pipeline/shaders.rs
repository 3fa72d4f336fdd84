pub mod lambert;
