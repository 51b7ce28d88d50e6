mod create_flow;
